//! # drive-api
//!
//! HTTP API layer for Cloud Drive built on Axum.
//!
//! Exposes the drive operations as REST endpoints under `/api`, with
//! bearer-token authentication, CORS, compression, request logging, and
//! a mapping from `AppError` kinds to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
