//! Signed blob retrieval. Authorization comes from the URL token, not
//! from a bearer header.

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;

use drive_core::error::AppError;

use crate::dto::request::BlobQuery;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /api/blobs/{*key}?token=
pub async fn fetch_blob(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
    ApiQuery(query): ApiQuery<BlobQuery>,
) -> Result<Response, ApiError> {
    let blob = state.drive.open_signed_blob(&key, &query.token).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, blob.content_type)
        .header(header::CACHE_CONTROL, "private, no-store")
        .body(Body::from_stream(blob.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;
    Ok(response)
}
