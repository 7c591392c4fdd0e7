//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use drive_auth::JwtDecoder;
use drive_core::config::AppConfig;
use drive_service::DriveService;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Drive operations.
    pub drive: Arc<DriveService>,
    /// Bearer token verifier.
    pub jwt_decoder: Arc<JwtDecoder>,
}

impl AppState {
    /// Wires the state from configuration and a ready drive service.
    pub fn new(config: AppConfig, drive: DriveService) -> Self {
        let jwt_decoder = JwtDecoder::new(&config.auth);
        Self {
            config: Arc::new(config),
            drive: Arc::new(drive),
            jwt_decoder: Arc::new(jwt_decoder),
        }
    }
}
