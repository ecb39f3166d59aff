//! Confirmation prompt with a preset answer, for headless use.

use async_trait::async_trait;

use crate::ports::ConfirmationPrompt;

#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation {
    answer: bool,
}

impl FixedConfirmation {
    pub fn always_accept() -> Self {
        Self { answer: true }
    }

    pub fn always_decline() -> Self {
        Self { answer: false }
    }
}

#[async_trait]
impl ConfirmationPrompt for FixedConfirmation {
    async fn confirm(&self, message: &str) -> bool {
        tracing::debug!(prompt = message, answer = self.answer, "confirmation requested");
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_preset_answer() {
        assert!(FixedConfirmation::always_accept().confirm("ok?").await);
        assert!(!FixedConfirmation::always_decline().confirm("ok?").await);
    }
}
