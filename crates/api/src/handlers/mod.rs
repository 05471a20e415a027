pub mod attachments;
pub mod todos;
