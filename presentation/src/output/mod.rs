//! Report formatting module

mod console;
mod decision;
mod formatter;
mod json;
mod markdown;

pub use console::ConsoleFormatter;
pub use decision::DecisionFormatter;
pub use formatter::OutputFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

use debate_domain::OutputFormat;

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Full => Box::new(ConsoleFormatter),
        OutputFormat::Decision => Box::new(DecisionFormatter),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Turn off ANSI colors for every formatter and progress reporter
pub fn disable_color() {
    colored::control::set_override(false);
}
