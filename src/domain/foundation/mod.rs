//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, error types and the state machine trait
//! that form the vocabulary of the dashboard domain.

mod errors;
mod score;
mod star_rating;
mod state_machine;

pub use errors::ValidationError;
pub use score::Score;
pub use star_rating::StarRating;
pub use state_machine::StateMachine;
