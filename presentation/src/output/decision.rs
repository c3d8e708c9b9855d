//! Decision-only output

use super::formatter::{OutputFormatter, method_label, status_note};
use colored::Colorize;
use debate_application::DebateStatus;
use debate_domain::TranscriptExport;

/// Prints just the final answer and how it was reached
pub struct DecisionFormatter;

impl OutputFormatter for DecisionFormatter {
    fn format(&self, export: &TranscriptExport, status: DebateStatus) -> String {
        let decision = &export.decision;
        let mut output = String::new();

        if decision.is_no_consensus() {
            output.push_str(&format!("{}\n", "No consensus".red().bold()));
        } else {
            output.push_str(&format!("{}\n", decision.answer.to_string().bold()));
        }
        output.push_str(&format!(
            "{} {}\n",
            "via".dimmed(),
            method_label(decision).dimmed()
        ));

        if let Some(note) = status_note(status) {
            output.push_str(&format!("{}\n", note.yellow()));
        }
        output
    }
}
