//! System info, fetched once on mount.

mod load_system_info;

pub use load_system_info::LoadSystemInfoHandler;
