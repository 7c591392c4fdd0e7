//! Per-user drive session.
//!
//! The session owns the [`DriveState`] of one signed-in user and is the
//! only thing that mutates it. Every remote operation follows the same
//! shape: set `loading`, clear `error`, call the [`DriveService`], record
//! a failure in `error` plus an error notice, re-list the current folder
//! after a successful mutation, clear `loading`.

use tracing::{debug, warn};
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::types::SortDirection;
use drive_entity::file::File;
use drive_entity::folder::Folder;
use drive_entity::item::{DriveItem, ItemKind};
use drive_entity::upload::UploadProgress;
use drive_entity::view::{SortBy, ViewMode};

use super::service::DriveService;
use super::state::{DriveState, Notice};
use crate::context::RequestContext;
use crate::file::{DownloadLink, UploadRequest};

/// Orchestrates drive operations for one user and keeps the view in sync.
#[derive(Debug)]
pub struct DriveSession {
    service: DriveService,
    ctx: Option<RequestContext>,
    state: DriveState,
    notices: Vec<Notice>,
}

fn plural(count: u64, kind: ItemKind) -> String {
    match count {
        1 => format!("1 {kind}"),
        n => format!("{n} {kind}s"),
    }
}

impl DriveSession {
    /// Creates a session. Without a context every remote call fails with
    /// `Unauthorized`.
    pub fn new(service: DriveService, ctx: Option<RequestContext>) -> Self {
        Self {
            service,
            ctx,
            state: DriveState::default(),
            notices: Vec::new(),
        }
    }

    /// Attaches a signed-in user and resets the view to the root.
    pub fn sign_in(&mut self, ctx: RequestContext) {
        self.ctx = Some(ctx);
        self.state = DriveState::default();
        self.notices.clear();
    }

    /// Detaches the user and drops all cached rows.
    pub fn sign_out(&mut self) {
        self.ctx = None;
        self.state = DriveState::default();
        self.notices.clear();
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    /// Folders then files, search-filtered and sorted.
    pub fn visible_items(&self) -> Vec<DriveItem> {
        self.state.visible_items()
    }

    /// Drains pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn context(&self) -> Result<RequestContext, AppError> {
        self.ctx
            .ok_or_else(|| AppError::unauthorized("You must be signed in"))
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    fn record_failure(&mut self, err: &AppError) {
        warn!(kind = %err.kind, error = %err.message, "Drive operation failed");
        self.state.error = Some(err.clone());
        self.notices.push(Notice::error(err.message.clone()));
    }

    /// Finishes a mutation: notice and re-list on success, record on failure.
    async fn settle<T>(
        &mut self,
        result: Result<T, AppError>,
        success: impl FnOnce(&T) -> String,
    ) -> Result<T, AppError> {
        match &result {
            Ok(value) => self.notices.push(Notice::success(success(value))),
            Err(e) => self.record_failure(e),
        }
        if result.is_ok() {
            self.reload().await;
        }
        self.state.loading = false;
        result
    }

    /// Re-lists the current folder. On failure the previous rows stay.
    async fn reload(&mut self) {
        if let Err(e) = self.fetch_current().await {
            self.record_failure(&e);
        }
    }

    async fn fetch_current(&mut self) -> Result<(), AppError> {
        let ctx = self.context()?;
        let listing = self
            .service
            .list(&ctx, self.state.current_folder_id)
            .await?;
        self.state.files = listing.files;
        self.state.folders = listing.folders;
        debug!(
            folder_id = ?self.state.current_folder_id,
            files = self.state.files.len(),
            folders = self.state.folders.len(),
            "Drive view refreshed"
        );
        Ok(())
    }

    /// Re-lists the current folder.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.begin();
        let result = self.fetch_current().await;
        if let Err(e) = &result {
            self.record_failure(e);
        }
        self.state.loading = false;
        result
    }

    /// Opens a folder (`None` for the root): clears the selection,
    /// recomputes breadcrumbs, and lists its children.
    ///
    /// The target, its trail and its listing are all fetched before the
    /// state switches over, so a failure leaves the previous view intact.
    pub async fn navigate_to_folder(&mut self, folder_id: Option<Uuid>) -> Result<(), AppError> {
        self.begin();
        let result = self.open_folder(folder_id).await;
        if let Err(e) = &result {
            self.record_failure(e);
        }
        self.state.loading = false;
        result
    }

    async fn open_folder(&mut self, folder_id: Option<Uuid>) -> Result<(), AppError> {
        let ctx = self.context()?;
        if let Some(id) = folder_id {
            self.service.get_folder(&ctx, id).await?;
        }
        let breadcrumbs = self.service.breadcrumbs(&ctx, folder_id).await?;
        let listing = self.service.list(&ctx, folder_id).await?;

        self.state.current_folder_id = folder_id;
        self.state.selected_items.clear();
        self.state.breadcrumbs = breadcrumbs;
        self.state.files = listing.files;
        self.state.folders = listing.folders;
        debug!(folder_id = ?folder_id, "Opened folder");
        Ok(())
    }

    /// Uploads files one at a time into `target` (the current folder when
    /// `None`). A failure does not stop the remaining files.
    pub async fn upload_files(
        &mut self,
        requests: Vec<UploadRequest>,
        target: Option<Uuid>,
    ) -> Vec<Result<File, AppError>> {
        self.begin();
        let folder_id = target.or(self.state.current_folder_id);
        let first = self.state.upload_progress.len();
        self.state.upload_progress.extend(
            requests
                .iter()
                .map(|r| UploadProgress::pending(r.file_name.clone())),
        );

        let mut results = Vec::with_capacity(requests.len());
        for (offset, request) in requests.into_iter().enumerate() {
            let slot = first + offset;
            self.state.upload_progress[slot].start();

            let result = match self.context() {
                Ok(ctx) => {
                    self.service
                        .upload(&ctx, request.in_folder(folder_id))
                        .await
                }
                Err(e) => Err(e),
            };

            match &result {
                Ok(file) => {
                    self.state.upload_progress[slot].complete();
                    self.notices
                        .push(Notice::success(format!("Uploaded {}", file.name)));
                }
                Err(e) => {
                    self.state.upload_progress[slot].fail(e.message.clone());
                    self.record_failure(e);
                }
            }
            results.push(result);
        }

        if results.iter().any(Result::is_ok) {
            self.reload().await;
        }
        self.state.loading = false;
        results
    }

    /// Creates a folder under `parent_id` (the current folder when `None`).
    pub async fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        self.begin();
        let parent = parent_id.or(self.state.current_folder_id);
        let result = match self.context() {
            Ok(ctx) => self.service.create_folder(&ctx, name, parent).await,
            Err(e) => Err(e),
        };
        self.settle(result, |f| format!("Folder '{}' created", f.name))
            .await
    }

    /// Renames a file or folder.
    pub async fn rename_item(
        &mut self,
        id: Uuid,
        new_name: &str,
        kind: ItemKind,
    ) -> Result<DriveItem, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.rename_item(&ctx, id, new_name, kind).await,
            Err(e) => Err(e),
        };
        self.settle(result, |item| format!("Renamed to '{}'", item.name()))
            .await
    }

    /// Permanently deletes items.
    pub async fn delete_items(&mut self, ids: &[Uuid], kind: ItemKind) -> Result<u64, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.delete_items(&ctx, ids, kind).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            self.deselect_all_of(ids);
        }
        self.settle(result, |n| format!("Deleted {}", plural(*n, kind)))
            .await
    }

    /// Moves items to the trash.
    pub async fn move_to_trash(&mut self, ids: &[Uuid], kind: ItemKind) -> Result<u64, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.move_to_trash(&ctx, ids, kind).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            self.deselect_all_of(ids);
        }
        self.settle(result, |n| format!("Moved {} to trash", plural(*n, kind)))
            .await
    }

    /// Restores items from the trash.
    pub async fn restore_from_trash(
        &mut self,
        ids: &[Uuid],
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.restore_from_trash(&ctx, ids, kind).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            self.deselect_all_of(ids);
        }
        self.settle(result, |n| format!("Restored {}", plural(*n, kind)))
            .await
    }

    /// Flips the starred flag.
    pub async fn toggle_star(&mut self, id: Uuid, kind: ItemKind) -> Result<DriveItem, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.toggle_star(&ctx, id, kind).await,
            Err(e) => Err(e),
        };
        self.settle(result, |item| {
            if item.is_starred() {
                format!("Starred '{}'", item.name())
            } else {
                format!("Removed star from '{}'", item.name())
            }
        })
        .await
    }

    /// Moves items under `target` (`None` for the root).
    pub async fn move_items(
        &mut self,
        ids: &[Uuid],
        target: Option<Uuid>,
        kind: ItemKind,
    ) -> Result<u64, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.move_items(&ctx, ids, target, kind).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            self.deselect_all_of(ids);
        }
        self.settle(result, |n| format!("Moved {}", plural(*n, kind)))
            .await
    }

    /// Requests a signed download link.
    pub async fn download(&mut self, file_id: Uuid) -> Result<DownloadLink, AppError> {
        self.begin();
        let result = match self.context() {
            Ok(ctx) => self.service.download(&ctx, file_id).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.record_failure(e);
        }
        self.state.loading = false;
        result
    }

    /// Adds an item to the selection.
    pub fn select(&mut self, id: Uuid) {
        self.state.selected_items.insert(id);
    }

    /// Removes an item from the selection.
    pub fn deselect(&mut self, id: Uuid) {
        self.state.selected_items.remove(&id);
    }

    /// Selects an unselected item, deselects a selected one.
    pub fn toggle_selection(&mut self, id: Uuid) {
        if !self.state.selected_items.remove(&id) {
            self.state.selected_items.insert(id);
        }
    }

    /// Selects every item of the current folder.
    pub fn select_all(&mut self) {
        let ids: Vec<Uuid> = self.state.all_item_ids().collect();
        self.state.selected_items.extend(ids);
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.state.selected_items.clear();
    }

    fn deselect_all_of(&mut self, ids: &[Uuid]) {
        for id in ids {
            self.state.selected_items.remove(id);
        }
    }

    /// Switches between grid and list layout.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    /// Sets the sort field and direction.
    pub fn set_sort(&mut self, by: SortBy, order: SortDirection) {
        self.state.sort_by = by;
        self.state.sort_order = order;
    }

    /// Sets the name filter.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// Drops progress entries that reached a terminal state.
    pub fn clear_finished_uploads(&mut self) {
        self.state
            .upload_progress
            .retain(|p| !p.status.is_terminal());
    }
}
