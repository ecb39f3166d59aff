//! Headless notifier and confirmation adapters.

mod fixed_confirmation;
mod tracing_notifier;

pub use fixed_confirmation::FixedConfirmation;
pub use tracing_notifier::TracingNotifier;
