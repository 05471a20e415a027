//! Blob storage for to-do attachments.
//!
//! Clients never stream files through the API. They ask for a presigned
//! `PUT` URL, upload straight to the bucket, then tell the API the upload is
//! complete so the final object URL can be recorded on the item.

pub mod config;
pub mod signer;

use todo_core::types::TodoId;

/// Object key an item's attachment is stored under.
pub fn attachment_key(todo_id: TodoId) -> String {
    todo_id.to_string()
}

/// Public URL of an item's attachment once uploaded.
pub fn attachment_url(bucket: &str, todo_id: TodoId) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{}", attachment_key(todo_id))
}
