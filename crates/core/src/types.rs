/// Opaque identity of the caller, taken from the `sub` claim of the bearer token.
pub type UserId = String;

/// Identifier of a to-do item within its owner's collection.
pub type TodoId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Due dates carry no time component (`YYYY-MM-DD` on the wire).
pub type DueDate = chrono::NaiveDate;
