//! Bearer token creation for development and tests.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use drive_core::config::AuthConfig;
use drive_core::error::AppError;

use super::claims::Claims;

/// Creates signed bearer tokens with the shared secret.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Issues a token for `user_id` valid for `ttl_minutes`.
    pub fn issue(
        &self,
        user_id: Uuid,
        ttl_minutes: u64,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let minutes = i64::try_from(ttl_minutes)
            .map_err(|_| AppError::validation("Token TTL is out of range"))?;
        let exp = now + Duration::minutes(minutes);
        self.sign(user_id, now, exp).map(|token| (token, exp))
    }

    /// Issues a token that expired an hour ago.
    pub fn issue_expired(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>), AppError> {
        let issued = Utc::now() - Duration::hours(2);
        let exp = issued + Duration::hours(1);
        self.sign(user_id, issued, exp).map(|token| (token, exp))
    }

    fn sign(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
