//! Analysis backend adapters.

mod http_review_api;

pub use http_review_api::HttpReviewApi;
