//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dashboard logic and the outside world. Adapters implement these ports.
//!
//! - `ReviewApi` - The remote analysis backend
//! - `ConfirmationPrompt` - Yes/no dialog before destructive actions
//! - `UserNotifier` - One-off user-facing notices

mod confirmation;
mod notifier;
mod review_api;

pub use confirmation::ConfirmationPrompt;
pub use notifier::{Notice, NoticeLevel, UserNotifier};
pub use review_api::{
    AnalyzePayload, ApiError, ClearReceipt, ClearRequest, ClearScope, ExportReceipt, ReviewApi,
};
