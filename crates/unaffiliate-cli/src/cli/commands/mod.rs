//! CLI command handlers. Each command is in its own file for clarity.

mod check;
mod clean;
mod click;
mod completions;
mod messages;
mod scan;
mod stats;

pub use check::run_check;
pub use clean::run_clean;
pub use click::run_click;
pub use completions::{run_completions, run_man};
pub use messages::run_messages;
pub use scan::{run_scan, ScanOptions};
pub use stats::run_stats;
