//! CLI command handlers, one per file.

mod completions;
mod config;
mod show;

pub use completions::run_completions;
pub use config::run_config;
pub use show::{run_show, ShowArgs};
