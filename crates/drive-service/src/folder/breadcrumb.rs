//! Breadcrumb paths from the root to a folder.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_database::repositories::FolderRepository;
use drive_entity::folder::{Breadcrumb, Folder};

use crate::context::RequestContext;

/// Upper bound on parent hops when walking towards the root.
pub const MAX_BREADCRUMB_DEPTH: usize = 256;

/// Walk `parent_id` links upward from `start`, nearest folder first.
///
/// Stops at the root, at a missing or unowned row, at a revisited id, or
/// after [`MAX_BREADCRUMB_DEPTH`] hops.
pub(crate) async fn ancestors(
    repo: &dyn FolderRepository,
    owner_id: Uuid,
    start: Uuid,
) -> Result<Vec<Folder>, AppError> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if chain.len() >= MAX_BREADCRUMB_DEPTH {
            warn!(folder_id = %start, "Folder chain exceeds maximum depth");
            break;
        }
        if !seen.insert(id) {
            warn!(folder_id = %id, "Cycle in folder parents");
            break;
        }
        let Some(folder) = repo.find_owned(owner_id, id).await? else {
            break;
        };
        current = folder.parent_id;
        chain.push(folder);
    }

    Ok(chain)
}

/// Computes breadcrumb trails.
#[derive(Debug, Clone)]
pub struct BreadcrumbService {
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
}

impl BreadcrumbService {
    /// Creates a new breadcrumb service.
    pub fn new(folder_repo: Arc<dyn FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Root-first trail ending at `folder_id`; `[My Drive]` for the root.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let mut trail = vec![Breadcrumb::root()];
        if let Some(id) = folder_id {
            let chain = ancestors(self.folder_repo.as_ref(), ctx.user_id, id).await?;
            trail.extend(chain.iter().rev().map(Breadcrumb::from));
        }
        Ok(trail)
    }
}
