//! Console output formatter for debate transcripts

use super::formatter::{
    OutputFormatter, answer_label, method_label, score_label, status_note, tally_lines,
};
use colored::Colorize;
use debate_application::DebateStatus;
use debate_domain::{RoundRecord, TranscriptExport};

/// Formats the full transcript for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every round followed by the decision
    pub fn format(export: &TranscriptExport, status: DebateStatus) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Math Debate"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Problem:".cyan().bold(),
            export.problem.text()
        ));

        for record in &export.rounds {
            output.push_str(&Self::round(record));
        }

        if export.rounds.is_empty() {
            output.push_str(&format!("\n{}\n", "No round completed.".dimmed()));
        }

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&Self::decision(export));

        if let Some(note) = status_note(status) {
            output.push_str(&format!("\n{}\n", note.yellow()));
        }

        output.push_str(&Self::footer());
        output
    }

    fn round(record: &RoundRecord) -> String {
        let mut output = Self::section_header(&format!("Round {}", record.round()));

        for (candidate, score) in record.entries() {
            let title = format!("── {} ({}) ──", candidate.agent, candidate.strategy);
            let title = if candidate.is_failed() {
                title.red().bold()
            } else {
                title.yellow().bold()
            };
            output.push_str(&format!("\n{}\n", title));

            if !candidate.raw_text.is_empty() {
                output.push_str(&Self::indent(candidate.raw_text.trim(), "  "));
                output.push('\n');
            }

            output.push_str(&format!(
                "{} {}\n",
                "Answer:".bold(),
                answer_label(candidate)
            ));
            output.push_str(&format!("{} {}\n", "Score:".bold(), score_label(score)));
            output.push_str(&format!(
                "{} {}\n",
                "Critique:".dimmed(),
                score.rationale.trim()
            ));
        }

        output
    }

    fn decision(export: &TranscriptExport) -> String {
        let decision = &export.decision;
        let answer = if decision.is_no_consensus() {
            "no consensus".red().bold()
        } else {
            decision.answer.to_string().green().bold()
        };

        let mut output = format!("{} {}\n", "Answer:".cyan().bold(), answer);
        output.push_str(&format!("{} {}\n", "Method:".cyan(), method_label(decision)));
        if let Some(winner) = decision.winner {
            output.push_str(&format!("{} {}\n", "Reported by:".cyan(), winner));
        }
        for line in tally_lines(decision) {
            output.push_str(&format!("  * {}\n", line));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, export: &TranscriptExport, status: DebateStatus) -> String {
        Self::format(export, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support;

    #[test]
    fn test_full_output_lists_every_candidate() {
        let output = ConsoleFormatter::format(&test_support::export(), DebateStatus::Completed);

        assert!(output.contains("What is 6 times 7?"));
        assert!(output.contains("Round 1"));
        assert!(output.contains("agent-2 (contrastive)"));
        assert!(output.contains("rationale for agent 1"));
        assert!(output.contains("majority (round 1)"));
        assert!(output.contains("42: 2 votes"));
        assert!(!output.contains("Cancelled"));
    }

    #[test]
    fn test_cancelled_note() {
        let output =
            ConsoleFormatter::format(&test_support::export(), DebateStatus::Cancelled { round: 2 });
        assert!(output.contains("Cancelled during round 2"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
