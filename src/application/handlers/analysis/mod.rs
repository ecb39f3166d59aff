//! Analysis dispatch and stored-analysis lookup.

mod lookup_stored_analysis;
mod run_analysis;

pub use lookup_stored_analysis::{
    LookupStoredAnalysisHandler, LOOKUP_FAILED_NOTICE, NOT_FOUND_NOTICE,
};
pub use run_analysis::{analysis_failure_message, AnalysisRequest, RunAnalysisHandler};
