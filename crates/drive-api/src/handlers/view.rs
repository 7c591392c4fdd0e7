//! Cross-folder views: starred, trash, recent.

use axum::Json;
use axum::extract::State;

use drive_service::Listing;

use crate::dto::request::RecentQuery;
use crate::dto::response::FilesResponse;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/starred
pub async fn starred(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Listing>, ApiError> {
    Ok(Json(state.drive.list_starred(&auth).await?))
}

/// GET /api/trash
pub async fn trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Listing>, ApiError> {
    Ok(Json(state.drive.list_trashed(&auth).await?))
}

/// GET /api/recent?limit=
pub async fn recent(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> Result<Json<FilesResponse>, ApiError> {
    let files = state.drive.list_recent(&auth, query.limit).await?;
    Ok(Json(FilesResponse { files }))
}
