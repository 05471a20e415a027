//! Domain types and validation shared by every crate in the workspace.
//!
//! Nothing in here touches the database, the network or the HTTP layer.

pub mod error;
pub mod todo;
pub mod types;
