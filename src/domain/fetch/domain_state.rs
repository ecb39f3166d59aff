//! Per-domain fetch state and its reducer.
//!
//! One `DomainState<T>` exists per data domain (analysis, memory, system
//! info). Dispatchers drive it with three calls:
//!
//! 1. [`DomainState::begin`] when a request is about to go out, which hands
//!    back a [`DispatchTicket`];
//! 2. [`DomainState::settle`] with that ticket once the request resolves;
//! 3. [`DomainState::reject`] when input is refused before any request.
//!
//! Tickets carry a monotonic generation. Only the settlement of the most
//! recent dispatch is applied, so a slow response to an older request can
//! never overwrite a newer one. After [`DomainState::detach`] nothing is
//! applied at all.

use serde::Serialize;
use uuid::Uuid;

use super::FetchStatus;
use crate::domain::foundation::StateMachine;

/// Handle for one outstanding dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTicket {
    generation: u64,
    request_id: Uuid,
}

impl DispatchTicket {
    /// Sequence number of this dispatch within its domain.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Correlation id used in logs.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

/// What to do with previously loaded data when a new dispatch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Keep showing the last data while the refresh is pending.
    Keep,
    /// Drop the last data as soon as the dispatch starts.
    Clear,
}

/// Resolution of a dispatch, produced by the dispatcher from the call result.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement<T> {
    /// The call returned an acceptable payload.
    Succeeded(T),
    /// The call failed. `fallback` replaces the data when present;
    /// otherwise the previous data is kept.
    Failed {
        message: String,
        fallback: Option<T>,
    },
}

impl<T> Settlement<T> {
    /// Creates a failure that keeps the previous data.
    pub fn failed(message: impl Into<String>) -> Self {
        Settlement::Failed {
            message: message.into(),
            fallback: None,
        }
    }

    /// Creates a failure that replaces the data with `fallback`.
    pub fn failed_with(message: impl Into<String>, fallback: T) -> Self {
        Settlement::Failed {
            message: message.into(),
            fallback: Some(fallback),
        }
    }
}

/// Whether a settlement changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer dispatch (or a local rejection) happened since the ticket was issued.
    Superseded,
    /// The owning view has been torn down.
    Detached,
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

/// Loading/error/success state of one data domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainState<T> {
    status: FetchStatus,
    data: Option<T>,
    error_message: Option<String>,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    detached: bool,
}

impl<T> Default for DomainState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DomainState<T> {
    /// Creates an idle state with no data.
    pub fn new() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error_message: None,
            generation: 0,
            detached: false,
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Number of dispatches and rejections seen so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enters `Pending` for a new dispatch.
    ///
    /// Clears any stale error message. Any ticket issued earlier is
    /// superseded by the returned one.
    pub fn begin(&mut self, retention: Retention) -> DispatchTicket {
        self.generation += 1;
        self.transition(FetchStatus::Pending);
        self.error_message = None;
        if retention == Retention::Clear {
            self.data = None;
        }
        DispatchTicket {
            generation: self.generation,
            request_id: Uuid::new_v4(),
        }
    }

    /// Applies the settlement of `ticket` if it is still the latest dispatch.
    pub fn settle(&mut self, ticket: &DispatchTicket, settlement: Settlement<T>) -> ApplyOutcome {
        if self.detached {
            return ApplyOutcome::Detached;
        }
        if ticket.generation != self.generation {
            return ApplyOutcome::Superseded;
        }

        match settlement {
            Settlement::Succeeded(data) => {
                self.transition(FetchStatus::Success);
                self.data = Some(data);
                self.error_message = None;
            }
            Settlement::Failed { message, fallback } => {
                self.transition(FetchStatus::Failure);
                if let Some(fallback) = fallback {
                    self.data = Some(fallback);
                }
                self.error_message = Some(message);
            }
        }
        ApplyOutcome::Applied
    }

    /// Records a local rejection: `Failure` with `message`, no round-trip.
    ///
    /// Data is kept. Any outstanding dispatch is superseded.
    pub fn reject(&mut self, message: impl Into<String>) {
        if self.detached {
            return;
        }
        self.generation += 1;
        self.transition(FetchStatus::Failure);
        self.error_message = Some(message.into());
    }

    /// Stops all further updates; used when the owning view goes away.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    fn transition(&mut self, target: FetchStatus) {
        match self.status.transition_to(target) {
            Ok(next) => self.status = next,
            Err(err) => {
                // Unreachable with the transitions above; keep the old status.
                tracing::error!(from = ?self.status, to = ?target, "{}", err);
            }
        }
    }
}
