//! ExportMemoryHandler - Asks the backend to export memory to a file.
//!
//! Fire-and-forget: the user gets a notice either way and no domain state
//! changes.

use std::sync::Arc;

use crate::application::DispatchError;
use crate::ports::{ExportReceipt, Notice, ReviewApi, UserNotifier};

pub const EXPORT_FAILED_NOTICE: &str = "Failed to export memory";

#[derive(Clone)]
pub struct ExportMemoryHandler {
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn UserNotifier>,
}

impl ExportMemoryHandler {
    pub fn new(api: Arc<dyn ReviewApi>, notifier: Arc<dyn UserNotifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn handle(&self) -> Result<ExportReceipt, DispatchError> {
        match self.api.export_memory().await {
            Ok(receipt) => {
                let path = receipt.file_path.as_deref().unwrap_or("unknown location");
                tracing::info!(file_path = path, "memory exported");
                self.notifier.notify(Notice::success(format!(
                    "Memory exported successfully to: {}",
                    path
                )));
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "error exporting memory");
                self.notifier.notify(Notice::error(EXPORT_FAILED_NOTICE));
                Err(err.into())
            }
        }
    }
}
