//! Answer value objects
//!
//! An [`Answer`] is either a parsed value or the [`Answer::Unparsed`]
//! sentinel. Parsed values keep the literal text exactly as the solver wrote
//! it inside the answer marker, alongside a normalized form used for every
//! equality check.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)(\d*)(?:\.(\d*))?$").expect("valid numeric pattern"));

static LATEX_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:text|mathrm|textbf|mathbf)\s*\{([^{}]*)\}").expect("valid wrapper pattern")
});

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₩', '₹'];

/// Normalized form of an answer, used for grouping and equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedValue {
    /// Canonical decimal: no leading zeros, no trailing fractional zeros
    Numeric(String),
    /// Anything that is not a plain decimal, lowercased with whitespace removed
    Symbolic(String),
}

impl NormalizedValue {
    /// Normalize a literal answer string.
    ///
    /// Returns `None` when nothing remains after cleanup.
    ///
    /// ```
    /// use debate_domain::debate::answer::NormalizedValue;
    ///
    /// let a = NormalizedValue::normalize("$1,200.00").unwrap();
    /// let b = NormalizedValue::normalize("1200").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn normalize(literal: &str) -> Option<Self> {
        let unwrapped = LATEX_WRAPPER.replace_all(literal, "$1");
        let cleaned: String = unwrapped
            .replace("\\$", "")
            .replace("\\%", "%")
            .replace("\\,", "")
            .replace("\\!", "")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '%')
            .filter(|c| !CURRENCY_SYMBOLS.contains(c))
            .collect();
        let cleaned = cleaned.trim_end_matches('.');

        if cleaned.is_empty() {
            return None;
        }

        if let Some(numeric) = canonical_decimal(cleaned) {
            return Some(NormalizedValue::Numeric(numeric));
        }

        Some(NormalizedValue::Symbolic(cleaned.to_lowercase()))
    }

    /// Get the canonical text of this value
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedValue::Numeric(s) | NormalizedValue::Symbolic(s) => s,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, NormalizedValue::Numeric(_))
    }
}

impl std::fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonicalize a plain decimal string, or `None` if it is not one
fn canonical_decimal(s: &str) -> Option<String> {
    let caps = NUMERIC.captures(s)?;
    let sign = caps.get(1).map_or("", |m| m.as_str());
    let int_part = caps.get(2).map_or("", |m| m.as_str());
    let frac_part = caps.get(3).map_or("", |m| m.as_str());

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    if sign == "-" && out != "0" {
        out.insert(0, '-');
    }
    Some(out)
}

/// A parsed answer: the literal as written plus its normalized form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerValue {
    literal: String,
    normalized: NormalizedValue,
}

impl AnswerValue {
    /// Parse a literal, returning `None` if it normalizes to nothing
    pub fn parse(literal: impl Into<String>) -> Option<Self> {
        let literal = literal.into().trim().to_string();
        let normalized = NormalizedValue::normalize(&literal)?;
        Some(Self {
            literal,
            normalized,
        })
    }

    /// The literal text, preserved for display
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The normalized form used for equality
    pub fn normalized(&self) -> &NormalizedValue {
        &self.normalized
    }

    /// Value equality (`17` and `17.0` are the same value)
    pub fn same_value(&self, other: &AnswerValue) -> bool {
        self.normalized == other.normalized
    }
}

/// The extracted answer of a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// A single, well-formed answer marker was found
    Value(AnswerValue),
    /// Extraction or invocation failed
    #[default]
    Unparsed,
}

impl Answer {
    /// Build a parsed answer from a literal; empty literals become `Unparsed`
    pub fn from_literal(literal: impl Into<String>) -> Self {
        AnswerValue::parse(literal).map_or(Answer::Unparsed, Answer::Value)
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Answer::Unparsed)
    }

    pub fn value(&self) -> Option<&AnswerValue> {
        match self {
            Answer::Value(v) => Some(v),
            Answer::Unparsed => None,
        }
    }

    /// The normalized value, if any
    pub fn normalized(&self) -> Option<&NormalizedValue> {
        self.value().map(AnswerValue::normalized)
    }

    /// The literal as originally written, if any
    pub fn display_literal(&self) -> Option<&str> {
        self.value().map(AnswerValue::literal)
    }

    /// Value equality; two `Unparsed` answers are never the same value
    pub fn same_value(&self, other: &Answer) -> bool {
        match (self, other) {
            (Answer::Value(a), Answer::Value(b)) => a.same_value(b),
            _ => false,
        }
    }

    /// Render this answer back as an answer marker (`\boxed{literal}`)
    pub fn to_marker(&self) -> Option<String> {
        self.display_literal()
            .map(|literal| format!("\\boxed{{{}}}", literal))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Value(v) => write!(f, "{}", v.literal()),
            Answer::Unparsed => write!(f, "Unparsed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(s: &str) -> NormalizedValue {
        NormalizedValue::Numeric(s.to_string())
    }

    #[test]
    fn test_trailing_zero_artifacts() {
        assert_eq!(NormalizedValue::normalize("17"), Some(numeric("17")));
        assert_eq!(NormalizedValue::normalize("17.0"), Some(numeric("17")));
        assert_eq!(NormalizedValue::normalize("9.00"), Some(numeric("9")));
        assert_eq!(NormalizedValue::normalize("0.50"), Some(numeric("0.5")));
        assert_eq!(NormalizedValue::normalize(".5"), Some(numeric("0.5")));
        assert_eq!(NormalizedValue::normalize("007"), Some(numeric("7")));
    }

    #[test]
    fn test_currency_and_commas() {
        assert_eq!(NormalizedValue::normalize("$11.00"), Some(numeric("11")));
        assert_eq!(NormalizedValue::normalize("\\$1,250"), Some(numeric("1250")));
        assert_eq!(NormalizedValue::normalize("€ 3.5"), Some(numeric("3.5")));
        assert_eq!(NormalizedValue::normalize("45%"), Some(numeric("45")));
    }

    #[test]
    fn test_signs() {
        assert_eq!(NormalizedValue::normalize("-4"), Some(numeric("-4")));
        assert_eq!(NormalizedValue::normalize("+4"), Some(numeric("4")));
        assert_eq!(NormalizedValue::normalize("-0.0"), Some(numeric("0")));
    }

    #[test]
    fn test_latex_wrappers() {
        assert_eq!(
            NormalizedValue::normalize("\\text{18}"),
            Some(numeric("18"))
        );
        assert_eq!(
            NormalizedValue::normalize("20\\text{ dollars}"),
            Some(NormalizedValue::Symbolic("20dollars".to_string()))
        );
    }

    #[test]
    fn test_symbolic_values() {
        assert_eq!(
            NormalizedValue::normalize("\\frac{3}{4}"),
            Some(NormalizedValue::Symbolic("\\frac{3}{4}".to_string()))
        );
        assert_eq!(
            NormalizedValue::normalize("Tuesday"),
            NormalizedValue::normalize("tuesday")
        );
    }

    #[test]
    fn test_empty_literals() {
        assert_eq!(NormalizedValue::normalize(""), None);
        assert_eq!(NormalizedValue::normalize("  $ "), None);
        assert_eq!(NormalizedValue::normalize("."), None);
        assert!(Answer::from_literal("").is_unparsed());
    }

    #[test]
    fn test_literal_preserved_for_display() {
        let a = Answer::from_literal("17.0");
        let b = Answer::from_literal("17");
        assert!(a.same_value(&b));
        assert_eq!(a.display_literal(), Some("17.0"));
        assert_eq!(a.to_string(), "17.0");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unparsed_never_equal() {
        assert!(!Answer::Unparsed.same_value(&Answer::Unparsed));
        assert!(!Answer::Unparsed.same_value(&Answer::from_literal("3")));
        assert_eq!(Answer::Unparsed.to_string(), "Unparsed");
        assert_eq!(Answer::Unparsed.to_marker(), None);
    }

    #[test]
    fn test_to_marker() {
        let a = Answer::from_literal("9.00");
        assert_eq!(a.to_marker().as_deref(), Some("\\boxed{9.00}"));
    }
}
