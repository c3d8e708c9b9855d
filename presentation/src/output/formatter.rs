//! Output formatter trait

use debate_application::DebateStatus;
use debate_domain::{Candidate, FinalDecision, Score, TranscriptExport};

/// Trait for rendering a finished (or cancelled) debate
pub trait OutputFormatter {
    fn format(&self, export: &TranscriptExport, status: DebateStatus) -> String;
}

/// The answer column for one candidate
pub(crate) fn answer_label(candidate: &Candidate) -> String {
    match (&candidate.failure, candidate.answer.display_literal()) {
        (Some(reason), _) => format!("failed ({})", reason),
        (None, Some(literal)) => literal.to_string(),
        (None, None) => "unparsed".to_string(),
    }
}

pub(crate) fn score_label(score: &Score) -> String {
    let mut label = format!("logic {}/10, computation {}/10", score.logic, score.computation);
    if score.substituted {
        label.push_str(" [substituted]");
    } else if score.clamped {
        label.push_str(" [clamped]");
    }
    label
}

/// One line summarizing how the answer was chosen
pub(crate) fn method_label(decision: &FinalDecision) -> String {
    match decision.derivation_round {
        Some(round) => format!("{} (round {})", decision.method, round),
        None => decision.method.to_string(),
    }
}

pub(crate) fn tally_lines(decision: &FinalDecision) -> Vec<String> {
    decision
        .tally
        .iter()
        .map(|t| match t.weight {
            Some(weight) => format!("{}: {} votes, weight {:.3}", t.value.as_str(), t.votes, weight),
            None => format!("{}: {} votes", t.value.as_str(), t.votes),
        })
        .collect()
}

pub(crate) fn status_note(status: DebateStatus) -> Option<String> {
    match status {
        DebateStatus::Completed => None,
        DebateStatus::Cancelled { round } => Some(format!(
            "Cancelled during round {}; resolved over completed rounds only",
            round
        )),
    }
}
