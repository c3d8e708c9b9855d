//! Markdown report

use super::formatter::{
    OutputFormatter, answer_label, method_label, score_label, status_note, tally_lines,
};
use debate_application::DebateStatus;
use debate_domain::{RoundRecord, TranscriptExport};

/// Renders a per-round markdown report
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    fn round(record: &RoundRecord) -> String {
        let mut output = format!("## Round {}\n\n", record.round());
        output.push_str("| Agent | Strategy | Answer | Logic | Computation |\n");
        output.push_str("|-------|----------|--------|-------|-------------|\n");
        for (candidate, score) in record.entries() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                candidate.agent,
                candidate.strategy,
                Self::cell(&answer_label(candidate)),
                score.logic,
                score.computation
            ));
        }

        for (candidate, score) in record.entries() {
            output.push_str(&format!("\n### {}\n\n", candidate.agent));
            if !candidate.raw_text.is_empty() {
                output.push_str(&format!("```text\n{}\n```\n\n", candidate.raw_text.trim()));
            }
            output.push_str(&format!(
                "**{}**: {}\n",
                score_label(score),
                score.rationale.trim()
            ));
        }
        output.push('\n');
        output
    }

    /// Keep table cells on one line
    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, export: &TranscriptExport, status: DebateStatus) -> String {
        let mut output = String::from("# Math Debate Report\n\n");
        output.push_str(&format!("## Problem\n\n{}\n\n", export.problem.text()));

        for record in &export.rounds {
            output.push_str(&Self::round(record));
        }

        let decision = &export.decision;
        output.push_str("## Decision\n\n");
        if decision.is_no_consensus() {
            output.push_str("- **Answer**: no consensus\n");
        } else {
            output.push_str(&format!("- **Answer**: `{}`\n", decision.answer));
        }
        output.push_str(&format!("- **Method**: {}\n", method_label(decision)));
        if let Some(winner) = decision.winner {
            output.push_str(&format!("- **Reported by**: {}\n", winner));
        }
        for line in tally_lines(decision) {
            output.push_str(&format!("  - {}\n", line));
        }
        if let Some(note) = status_note(status) {
            output.push_str(&format!("\n> {}\n", note));
        }
        output
    }
}
