//! CLI command handlers. Each command is in its own file for clarity.

mod check;
mod completions;
mod stamp;
mod verify;

pub use check::run_check;
pub use completions::run_completions;
pub use stamp::run_stamp;
pub use verify::run_verify;
