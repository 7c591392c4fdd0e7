//! File upload, listing, rename, delete, and download handlers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_entity::item::{DriveItem, ItemKind};
use drive_service::UploadRequest;

use crate::dto::request::{FolderQuery, RenameRequest};
use crate::dto::response::{DownloadResponse, FileResponse, FilesResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::validation(format!("Malformed upload: {e}"))
}

/// POST /api/files/upload
///
/// Multipart fields: `file` (required) and `folderId` (optional, empty
/// means the root).
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let mut multipart = multipart.map_err(|e| multipart_error(e.body_text()))?;
    let mut folder_id: Option<Uuid> = None;
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "folderId" => {
                let text = field.text().await.map_err(multipart_error)?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(parse_uuid(text)?);
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some((file_name, mime_type, data));
            }
            _ => {}
        }
    }

    let (file_name, mime_type, data) =
        upload.ok_or_else(|| AppError::validation("No file provided"))?;

    let mut request = UploadRequest::new(file_name, data).in_folder(folder_id);
    if let Some(mime_type) = mime_type {
        request = request.with_mime_type(mime_type);
    }

    let file = state.drive.upload(&auth, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(FileResponse {
            message: "File uploaded successfully".to_string(),
            file,
        }),
    ))
}

/// GET /api/files?folderId=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderQuery>,
) -> Result<Json<FilesResponse>, ApiError> {
    let files = state.drive.list_files(&auth, query.folder_id).await?;
    Ok(Json(FilesResponse { files }))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.drive.delete_items(&auth, &[id], ItemKind::File).await?;
    if deleted == 0 {
        return Err(AppError::not_found("File not found").into());
    }
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let link = state.drive.download(&auth, id).await?;
    Ok(Json(DownloadResponse {
        download_url: link.url,
        file_name: link.file_name,
        expires_at: link.expires_at,
    }))
}

/// PUT /api/files/{id}/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let item = state
        .drive
        .rename_item(&auth, id, &req.name, ItemKind::File)
        .await?;
    let DriveItem::File(file) = item else {
        return Err(AppError::internal("Rename returned a folder for a file").into());
    };
    Ok(Json(FileResponse {
        message: "File renamed successfully".to_string(),
        file,
    }))
}
