//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dashboard to external systems:
//! - `review_api` - reqwest client for the analysis backend
//! - `notify` - Headless notifier and confirmation prompt
//! - `mock` - Scriptable test doubles for every port

pub mod mock;
pub mod notify;
pub mod review_api;

pub use notify::{FixedConfirmation, TracingNotifier};
pub use review_api::HttpReviewApi;
