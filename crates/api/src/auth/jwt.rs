//! Bearer token verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the caller's user id. In
//! production they come from an external identity provider that shares the
//! secret; [`issue_token`] covers local runs and tests.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use todo_core::types::UserId;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id every store call is scoped by (e.g. `auth0|65a1...`).
    pub sub: UserId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
}

/// Why a token was refused.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token has no subject")]
    MissingSubject,

    #[error("malformed token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => Self::MissingSubject,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Token settings shared by issuing and verifying.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret.
    pub secret: String,
    /// Lifetime of tokens minted by [`issue_token`], in minutes.
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the expiry is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_ACCESS_EXPIRY_MINS must be an integer, got '{raw}'")),
            Err(_) => 60,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

/// Mint a token for `user_id` valid for the configured lifetime.
pub fn issue_token(user_id: &str, config: &JwtConfig) -> Result<String, TokenError> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
    };
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// Check signature and expiry and return the claims of a usable token.
///
/// A blank `sub` is refused: it would scope the caller to a shared,
/// anonymous collection.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let claims = decode::<Claims>(token, &key, &JwtConfig::validation())?.claims;

    if claims.sub.trim().is_empty() {
        return Err(TokenError::MissingSubject);
    }
    Ok(claims)
}
