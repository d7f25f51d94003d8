//! HS256 bearer-token validation.
//!
//! Tokens carry the numeric user id in `sub`. Signature and `exp` are
//! checked; nothing else about the user is trusted from the token.

use std::sync::Arc;

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id in the `users` table.
    pub sub: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

/// Shared secret used to verify tokens.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Arc<str>,
}

impl JwtConfig {
    #[must_use]
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Validate and decode a token, returning its [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Sign a token for `user_id` valid for `ttl_secs` seconds.
#[cfg(test)]
pub fn issue_token(user_id: i64, ttl_secs: i64, config: &JwtConfig) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + ttl_secs,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .expect("encode test token")
}
