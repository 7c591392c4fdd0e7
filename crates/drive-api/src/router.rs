//! Route definitions for the Cloud Drive HTTP API.
//!
//! All routes are mounted under `/api`. Everything except health and
//! signed blob retrieval requires a bearer token.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Slack on top of the upload limit for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the API router. Middleware is layered on in [`crate::app`].
pub fn build_router(state: AppState) -> Router {
    let max_body = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(folder_routes())
        .merge(item_routes())
        .merge(view_routes())
        .merge(blob_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files", get(handlers::file::list_files))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route("/files/{id}/rename", put(handlers::file::rename_file))
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            post(handlers::folder::create_folder).get(handlers::folder::list_folders),
        )
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/rename", put(handlers::folder::rename_folder))
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::breadcrumbs),
        )
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items/star", post(handlers::item::toggle_star))
        .route("/items/trash", post(handlers::item::move_to_trash))
        .route("/items/restore", post(handlers::item::restore_from_trash))
        .route("/items/move", post(handlers::item::move_items))
}

fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/starred", get(handlers::view::starred))
        .route("/trash", get(handlers::view::trash))
        .route("/recent", get(handlers::view::recent))
}

fn blob_routes() -> Router<AppState> {
    Router::new().route("/blobs/{*key}", get(handlers::blob::fetch_blob))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
