//! Scripted confirmation prompt for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::ConfirmationPrompt;

/// Answers from a script and records every prompt shown.
///
/// Once the script runs out, every further prompt gets the fallback answer
/// (no, unless built with [`ScriptedConfirmation::accepting`]).
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirmation {
    answers: Arc<Mutex<VecDeque<bool>>>,
    fallback: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirmation {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            fallback: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Says yes to every prompt.
    pub fn accepting() -> Self {
        Self {
            fallback: true,
            ..Self::new([])
        }
    }

    /// Says no to every prompt.
    pub fn declining() -> Self {
        Self::new([])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedConfirmation {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepting_says_yes_to_every_prompt() {
        let confirmation = ScriptedConfirmation::accepting();
        assert!(confirmation.confirm("first").await);
        assert!(confirmation.confirm("second").await);
        assert_eq!(confirmation.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn script_runs_out_to_declining() {
        let confirmation = ScriptedConfirmation::new([true]);
        assert!(confirmation.confirm("first").await);
        assert!(!confirmation.confirm("second").await);
    }
}
