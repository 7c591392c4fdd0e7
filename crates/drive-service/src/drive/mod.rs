//! The drive facade and the per-user drive session.

pub mod service;
pub mod session;
pub mod state;

pub use service::{DEFAULT_RECENT_LIMIT, DriveService, Listing};
pub use session::DriveSession;
pub use state::{DriveState, Notice, NoticeLevel};
