//! In-process test doubles for every port.

mod confirmation;
mod notifier;
mod review_api;

pub use confirmation::ScriptedConfirmation;
pub use notifier::RecordingNotifier;
pub use review_api::{Endpoint, MockCall, MockReviewApi};
