//! Application handlers.
//!
//! One handler per dispatcher operation. Each owns at most one domain's
//! write handle and talks to the backend only through ports.

pub mod analysis;
pub mod memory;
pub mod system;

pub use analysis::{
    analysis_failure_message, AnalysisRequest, LookupStoredAnalysisHandler, RunAnalysisHandler,
    LOOKUP_FAILED_NOTICE, NOT_FOUND_NOTICE,
};
pub use memory::{
    ClearMemoryHandler, ClearOutcome, ExportMemoryHandler, LoadMemoryHandler,
    CLEAR_FAILED_NOTICE, EXPORT_FAILED_NOTICE,
};
pub use system::LoadSystemInfoHandler;
