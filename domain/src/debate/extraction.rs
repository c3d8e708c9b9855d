//! Answer extraction from free-form solver text.
//!
//! The final `\boxed{...}` marker is the only source of truth: numbers that
//! appear in the prose (or in printed program output) are ignored. A text
//! with no marker, more than one marker, or an unbalanced marker yields
//! [`Answer::Unparsed`]; the extractor never guesses.
//!
//! Pure functions only: no I/O, deterministic for the same input.

use super::answer::{Answer, AnswerValue};
use regex::Regex;
use std::sync::LazyLock;

static MARKER_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:boxed|fbox)\s*\{").expect("valid marker pattern"));

/// Detailed result of scanning a text for answer markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Exactly one well-formed marker
    Found(AnswerValue),
    /// No marker in the text
    Missing,
    /// More than one marker; the count is kept for diagnostics
    Multiple(usize),
    /// A marker was opened but never closed, or its content is empty
    Malformed,
}

impl Extraction {
    /// Collapse into an [`Answer`], mapping every ambiguity to `Unparsed`
    pub fn into_answer(self) -> Answer {
        match self {
            Extraction::Found(value) => Answer::Value(value),
            Extraction::Missing | Extraction::Multiple(_) | Extraction::Malformed => {
                Answer::Unparsed
            }
        }
    }

    /// Whether this outcome is an extraction ambiguity worth logging
    pub fn is_ambiguous(&self) -> bool {
        !matches!(self, Extraction::Found(_))
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Extraction::Found(_) => "found",
            Extraction::Missing => "missing",
            Extraction::Multiple(_) => "multiple",
            Extraction::Malformed => "malformed",
        }
    }
}

/// Scan a raw solver text and report what was found.
pub fn scan_answer(raw_text: &str) -> Extraction {
    let mut contents = Vec::new();

    for start in MARKER_START.find_iter(raw_text) {
        match balanced_content(&raw_text[start.end()..]) {
            Some(content) => contents.push(content),
            None => return Extraction::Malformed,
        }
    }

    match contents.len() {
        0 => Extraction::Missing,
        1 => AnswerValue::parse(contents[0]).map_or(Extraction::Malformed, Extraction::Found),
        n => Extraction::Multiple(n),
    }
}

/// Extract the answer of a raw solver text.
///
/// ```
/// use debate_domain::debate::extraction::extract_answer;
///
/// let answer = extract_answer("He paid $11.00 at first... final answer \\boxed{9.00}");
/// assert_eq!(answer.display_literal(), Some("9.00"));
/// ```
pub fn extract_answer(raw_text: &str) -> Answer {
    scan_answer(raw_text).into_answer()
}

/// Return the text up to the brace closing an already-consumed `{`
fn balanced_content(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..idx]);
                }
            }
            _ => {}
        }
    }
    None
}
