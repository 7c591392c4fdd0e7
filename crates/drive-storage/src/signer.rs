//! Signed retrieval URLs for blobs.
//!
//! A signed URL carries an HS256 token whose subject is the storage key.
//! The blob route re-derives the key from the path and rejects the
//! request unless the token verifies, is unexpired, and names that key.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::storage::SignedUrl;

/// Route prefix the signed URLs point at.
pub const BLOB_ROUTE_PREFIX: &str = "/api/blobs";

/// Token payload of a signed URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BlobClaims {
    /// Storage key the URL grants access to.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies signed blob URLs.
#[derive(Clone)]
pub struct UrlSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    base_url: String,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer for URLs rooted at `base_url`.
    pub fn new(secret: &str, base_url: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a URL for `path` valid for `ttl_seconds` from now.
    pub fn sign(&self, path: &str, ttl_seconds: u64) -> AppResult<SignedUrl> {
        let now = Utc::now();
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| AppError::validation("Signed URL TTL is out of range"))?;
        let expires_at = now + Duration::seconds(ttl);
        let token = self.token_for(path, now, expires_at)?;

        Ok(SignedUrl {
            url: format!(
                "{}{}/{}?token={}",
                self.base_url,
                BLOB_ROUTE_PREFIX,
                path.trim_start_matches('/'),
                token
            ),
            expires_at,
        })
    }

    fn token_for(
        &self,
        path: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let claims = BlobClaims {
            sub: path.trim_start_matches('/').to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign blob URL: {e}")))
    }

    /// Check that `token` grants access to `path`.
    pub fn verify(&self, path: &str, token: &str) -> AppResult<()> {
        let data = decode::<BlobClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Download link has expired")
                }
                _ => AppError::unauthorized("Invalid download link"),
            },
        )?;

        if data.claims.sub != path.trim_start_matches('/') {
            return Err(AppError::unauthorized("Invalid download link"));
        }
        Ok(())
    }
}
