//! Process configuration read from the environment at startup.
//!
//! Misconfiguration panics with the offending variable named; the server
//! should not come up half-configured.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Read `key`, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value '{raw}'")),
        Err(_) => default,
    }
}

/// Which [`todo_db::store::TodoStore`] backs the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Process-local; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    /// `TODO_STORE=memory` selects the in-memory store. Otherwise (unset or
    /// `postgres`) `DATABASE_URL` is required.
    ///
    /// # Panics
    ///
    /// Panics on an unknown `TODO_STORE`, or when PostgreSQL is selected
    /// without `DATABASE_URL`.
    pub fn from_env() -> Self {
        let kind = std::env::var("TODO_STORE").unwrap_or_else(|_| "postgres".into());
        match kind.trim() {
            "memory" => Self::Memory,
            "postgres" => {
                let database_url = std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| panic!("DATABASE_URL must be set when TODO_STORE={kind}"));
                Self::Postgres { database_url }
            }
            other => panic!("TODO_STORE must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins the browser client may call from.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// plus the variables read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Socket address to listen on.
    ///
    /// # Panics
    ///
    /// Panics if `host` is not an IP address.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|_| panic!("HOST must be an IP address, got '{}'", self.host));
        SocketAddr::new(ip, self.port)
    }
}
