//! Intent-conditional presentation rules and the view composer.

mod copy;
mod sections;
mod view;

pub use copy::{Banner, IntentCopy, Tone};
pub use sections::{select_sections, sections_for, SectionDescriptor, SectionKind};
pub use view::{
    feature_label, format_rating, format_seconds, MemoryPanel, MemoryView, ReportView,
    SystemInfoView, ViewBlock, MAX_HISTORY_ROWS,
};
