//! Fetch-state machine shared by every data domain.

mod domain_state;
mod status;

pub use domain_state::{ApplyOutcome, DispatchTicket, DomainState, Retention, Settlement};
pub use status::FetchStatus;
