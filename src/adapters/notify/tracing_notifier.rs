//! Notifier that writes notices to the log.
//!
//! Headless default for the `UserNotifier` port; a UI front end supplies
//! its own toast/alert implementation.

use crate::ports::{Notice, NoticeLevel, UserNotifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl UserNotifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(notice = %notice.message, "user notice"),
            NoticeLevel::Success => tracing::info!(notice = %notice.message, "user notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_every_level_without_a_subscriber() {
        let notifier = TracingNotifier;
        notifier.notify(Notice::success("Memory exported successfully to: /tmp/x.json"));
        notifier.notify(Notice::error("Failed to export memory"));
    }
}
