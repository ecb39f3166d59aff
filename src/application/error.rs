//! Dispatcher error type.

use thiserror::Error;

use crate::domain::fetch::ApplyOutcome;
use crate::domain::foundation::ValidationError;
use crate::ports::ApiError;

/// Why a dispatcher operation did not produce its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// Input refused locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The result was not applied: a newer dispatch superseded it or the
    /// dashboard was torn down.
    #[error("result discarded ({0:?})")]
    Discarded(ApplyOutcome),
}

impl DispatchError {
    pub fn is_discarded(&self) -> bool {
        matches!(self, DispatchError::Discarded(_))
    }
}
