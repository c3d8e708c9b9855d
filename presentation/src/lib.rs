//! Presentation layer for math-debate
//!
//! This crate contains CLI definitions, report formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::{
    ConsoleFormatter, DecisionFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter,
    disable_color, formatter_for,
};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
