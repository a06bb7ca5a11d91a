//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;

use super::claims::Claims;

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

/// A freshly issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
        }
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: username.to_string(),
            uid: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }
}
