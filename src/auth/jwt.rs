use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_HOURS: i64 = 12;

/// Claims of the admin session cookie issued after a successful unlock.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    /// Session generation at issue time. Tokens from an older generation
    /// were revoked by a lock.
    pub epoch: u64,
}

impl Claims {
    pub fn admin(epoch: u64) -> Self {
        Self {
            sub: "admin".to_string(),
            exp: (Utc::now() + Duration::hours(SESSION_HOURS)).timestamp(),
            epoch,
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}
