//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the caller identity from a JWT Bearer token.

pub mod auth;
