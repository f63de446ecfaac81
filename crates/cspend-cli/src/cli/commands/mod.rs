//! CLI command handlers.

mod config;
mod filename;
mod search;

pub use config::run_config;
pub use filename::run_filename;
pub use search::{run_search, SearchArgs};
