//! Lifecycle status of one data domain.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of a domain's most recent fetch.
///
/// ```text
/// Idle ──dispatch──► Pending ──settle ok──► Success
///   │                  │  ▲                  │
///   │ reject           │  └──── refresh ─────┤
///   ▼                  ▼                     │
/// Failure ◄──settle err┘◄──── reject ────────┘
/// ```
///
/// `Pending -> Pending` covers a second dispatch before the first settles.
/// `-> Failure` without a round-trip is the local rejection of invalid input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failure,
}

impl FetchStatus {
    /// Returns true while a dispatch is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchStatus::Pending)
    }

    /// Returns true once a dispatch has settled, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchStatus::Success | FetchStatus::Failure)
    }
}

impl StateMachine for FetchStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FetchStatus::*;
        matches!(
            (self, target),
            (Idle, Pending)
                | (Idle, Failure)
                | (Pending, Pending)
                | (Pending, Success)
                | (Pending, Failure)
                | (Success, Pending)
                | (Success, Failure)
                | (Failure, Pending)
                | (Failure, Failure)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FetchStatus::*;
        match self {
            Idle => vec![Pending, Failure],
            Pending => vec![Pending, Success, Failure],
            Success => vec![Pending, Failure],
            Failure => vec![Pending, Failure],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FetchStatus; 4] = [
        FetchStatus::Idle,
        FetchStatus::Pending,
        FetchStatus::Success,
        FetchStatus::Failure,
    ];

    #[test]
    fn every_status_can_enter_pending() {
        for status in ALL {
            assert!(status.can_transition_to(&FetchStatus::Pending));
        }
    }

    #[test]
    fn only_pending_can_succeed() {
        for status in ALL {
            assert_eq!(
                status.can_transition_to(&FetchStatus::Success),
                status == FetchStatus::Pending
            );
        }
    }

    #[test]
    fn nothing_returns_to_idle() {
        for status in ALL {
            assert!(!status.can_transition_to(&FetchStatus::Idle));
        }
    }

    #[test]
    fn no_status_is_terminal() {
        for status in ALL {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn transitions_agree_with_can_transition_to() {
        for status in ALL {
            for target in ALL {
                assert_eq!(
                    status.valid_transitions().contains(&target),
                    status.can_transition_to(&target),
                    "{:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }

    #[test]
    fn transition_to_returns_target_when_allowed() {
        assert_eq!(
            FetchStatus::Idle.transition_to(FetchStatus::Pending),
            Ok(FetchStatus::Pending)
        );
    }

    #[test]
    fn transition_to_rejects_illegal_move() {
        let err = FetchStatus::Success
            .transition_to(FetchStatus::Idle)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Cannot transition from Success to Idle"));
    }

    #[test]
    fn settled_and_pending_flags() {
        assert!(FetchStatus::Pending.is_pending());
        assert!(!FetchStatus::Idle.is_settled());
        assert!(FetchStatus::Success.is_settled());
        assert!(FetchStatus::Failure.is_settled());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&FetchStatus::Failure).unwrap();
        assert_eq!(json, "\"failure\"");
    }
}
