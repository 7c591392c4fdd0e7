//! # drive-auth
//!
//! Bearer token handling for Cloud Drive. Tokens are issued by an
//! external identity provider and verified here with a shared HMAC
//! secret; the subject claim is the caller's user ID.
//!
//! `JwtEncoder` exists for local development and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
