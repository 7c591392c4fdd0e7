//! Handlers shared by files and folders: star, trash, restore, move.

use axum::Json;
use axum::extract::State;

use drive_entity::item::ItemKind;

use crate::dto::request::{BatchRequest, MoveRequest, StarRequest};
use crate::dto::response::{CountResponse, ItemResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

fn items(count: u64, kind: ItemKind) -> String {
    if count == 1 {
        format!("1 {kind}")
    } else {
        format!("{count} {kind}s")
    }
}

/// POST /api/items/star
pub async fn toggle_star(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<StarRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.drive.toggle_star(&auth, req.id, req.kind).await?;
    let message = if item.is_starred() {
        "Item starred"
    } else {
        "Item unstarred"
    };
    Ok(Json(ItemResponse {
        message: message.to_string(),
        item,
    }))
}

/// POST /api/items/trash
pub async fn move_to_trash(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<BatchRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.drive.move_to_trash(&auth, &req.ids, req.kind).await?;
    Ok(Json(CountResponse {
        message: format!("Moved {} to trash", items(count, req.kind)),
        count,
    }))
}

/// POST /api/items/restore
pub async fn restore_from_trash(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<BatchRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .drive
        .restore_from_trash(&auth, &req.ids, req.kind)
        .await?;
    Ok(Json(CountResponse {
        message: format!("Restored {}", items(count, req.kind)),
        count,
    }))
}

/// POST /api/items/move
pub async fn move_items(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MoveRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .drive
        .move_items(&auth, &req.ids, req.target_folder_id, req.kind)
        .await?;
    Ok(Json(CountResponse {
        message: format!("Moved {}", items(count, req.kind)),
        count,
    }))
}
