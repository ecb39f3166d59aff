//! Memory analytics: load, clear and export.

mod clear_memory;
mod export_memory;
mod load_memory;

pub use clear_memory::{ClearMemoryHandler, ClearOutcome, CLEAR_FAILED_NOTICE};
pub use export_memory::{ExportMemoryHandler, EXPORT_FAILED_NOTICE};
pub use load_memory::LoadMemoryHandler;
