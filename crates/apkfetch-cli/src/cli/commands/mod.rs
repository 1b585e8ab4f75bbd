//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod layouts;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use layouts::run_layouts;
