//! Bearer-token verification.
//!
//! - [`jwt`] -- HS256 token verification, plus issuance for local runs and tests.

pub mod jwt;
