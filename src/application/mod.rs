//! Application layer - Dispatchers, shared domain stores and the dashboard.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers write to their own domain store; views and callers only read.

mod dashboard;
mod error;
pub mod handlers;
pub mod store;

pub use dashboard::Dashboard;
pub use error::DispatchError;
pub use handlers::{
    AnalysisRequest, ClearMemoryHandler, ClearOutcome, ExportMemoryHandler, LoadMemoryHandler,
    LoadSystemInfoHandler, LookupStoredAnalysisHandler, RunAnalysisHandler,
};
pub use store::{DomainReader, DomainStore};
