//! Folder CRUD and breadcrumb handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_entity::item::{DriveItem, ItemKind};

use crate::dto::request::{CreateFolderRequest, ParentQuery, RenameRequest};
use crate::dto::response::{
    BreadcrumbsResponse, FolderResponse, FoldersResponse, MessageResponse,
};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<FolderResponse>), ApiError> {
    let folder = state
        .drive
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(FolderResponse {
            message: "Folder created successfully".to_string(),
            folder,
        }),
    ))
}

/// GET /api/folders?parentId=
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ParentQuery>,
) -> Result<Json<FoldersResponse>, ApiError> {
    let folders = state.drive.list_folders(&auth, query.parent_id).await?;
    Ok(Json(FoldersResponse { folders }))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .drive
        .delete_items(&auth, &[id], ItemKind::Folder)
        .await?;
    Ok(Json(MessageResponse::new("Folder deleted successfully")))
}

/// PUT /api/folders/{id}/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let item = state
        .drive
        .rename_item(&auth, id, &req.name, ItemKind::Folder)
        .await?;
    let DriveItem::Folder(folder) = item else {
        return Err(AppError::internal("Rename returned a file for a folder").into());
    };
    Ok(Json(FolderResponse {
        message: "Folder renamed successfully".to_string(),
        folder,
    }))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BreadcrumbsResponse>, ApiError> {
    let breadcrumbs = state.drive.breadcrumbs(&auth, Some(id)).await?;
    Ok(Json(BreadcrumbsResponse { breadcrumbs }))
}
