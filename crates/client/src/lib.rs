//! HTTP client for the to-do API.
//!
//! [`api::TodoClient`] wraps each endpoint; [`pager::Pager`] tracks the
//! previous/next navigation state a UI needs on top of `nextKey` paging.

pub mod api;
pub mod pager;
pub mod types;

pub use api::{ClientError, TodoClient};
pub use pager::Pager;
