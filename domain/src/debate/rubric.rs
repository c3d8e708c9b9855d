//! Two-axis critic rubric
//!
//! The critic grades every candidate on *logic* and *computation*, each in
//! `[0, 10]`. The numbers are opaque inputs: this module only reads them out
//! of free-form critic text and clamps them into range. The rationale is
//! kept verbatim and never interpreted.
//!
//! # Supported critic formats
//!
//! 1. **JSON** (preferred): `{"logic": 8, "computation": 9.5, "rationale": "..."}`
//! 2. **Labelled lines**: `Logic: 7/10` and `Computation: 6`

use super::candidate::CandidateId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Lowest rubric value on either axis
pub const RUBRIC_MIN: f64 = 0.0;
/// Highest rubric value on either axis
pub const RUBRIC_MAX: f64 = 10.0;

const LOGIC_KEYS: &[&str] = &["logic", "logic_score", "logical", "reasoning_score"];
const COMPUTATION_KEYS: &[&str] = &[
    "computation",
    "computation_score",
    "computational",
    "arithmetic",
];
const RATIONALE_KEYS: &[&str] = &["rationale", "critique", "explanation", "flaw", "reason"];

static LOGIC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"?\blogic(?:al)?(?:\s+score)?"?\s*[:=]\s*"?(-?\d+(?:\.\d+)?)"#)
        .expect("valid logic pattern")
});

static COMPUTATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)"?\b(?:computation(?:al)?|arithmetic|calculation)(?:\s+score)?"?\s*[:=]\s*"?(-?\d+(?:\.\d+)?)"#,
    )
    .expect("valid computation pattern")
});

/// Rubric values as reported by the critic, before clamping
#[derive(Debug, Clone, PartialEq)]
pub struct RubricReading {
    pub logic: f64,
    pub computation: f64,
    pub rationale: String,
}

/// Clamp one axis into `[RUBRIC_MIN, RUBRIC_MAX]`.
///
/// Returns the clamped value and whether clamping changed it. `NaN` maps to
/// the minimum.
pub fn clamp_axis(value: f64) -> (f64, bool) {
    if value.is_nan() {
        return (RUBRIC_MIN, true);
    }
    let clamped = value.clamp(RUBRIC_MIN, RUBRIC_MAX);
    (clamped, clamped != value)
}

/// The critic's grade of exactly one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub target: CandidateId,
    pub logic: f64,
    pub computation: f64,
    pub rationale: String,
    /// At least one axis was out of range and got clamped
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clamped: bool,
    /// The critic call failed and this score was substituted
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub substituted: bool,
}

impl Score {
    /// Create a score, clamping both axes into range
    pub fn new(
        target: CandidateId,
        logic: f64,
        computation: f64,
        rationale: impl Into<String>,
    ) -> Self {
        let (logic, logic_clamped) = clamp_axis(logic);
        let (computation, computation_clamped) = clamp_axis(computation);
        Self {
            target,
            logic,
            computation,
            rationale: rationale.into(),
            clamped: logic_clamped || computation_clamped,
            substituted: false,
        }
    }

    /// Score from a parsed critic reading
    pub fn from_reading(target: CandidateId, reading: RubricReading) -> Self {
        Self::new(target, reading.logic, reading.computation, reading.rationale)
    }

    /// Minimal score substituted for a failed critic call
    pub fn failed(target: CandidateId, reason: impl std::fmt::Display) -> Self {
        Self {
            target,
            logic: RUBRIC_MIN,
            computation: RUBRIC_MIN,
            rationale: format!("Critic failed: {}", reason),
            clamped: false,
            substituted: true,
        }
    }

    /// `logic + computation`, the tie-break key
    pub fn total(&self) -> f64 {
        self.logic + self.computation
    }

    /// Mean of both axes, on the `[0, 10]` scale
    pub fn mean(&self) -> f64 {
        self.total() / 2.0
    }
}

/// Parse a critic response into a rubric reading.
///
/// Returns `None` when neither format yields both axes.
///
/// ```
/// use debate_domain::debate::rubric::parse_rubric;
///
/// let r = parse_rubric(r#"{"logic": 8, "computation": 9.5, "rationale": "ok"}"#).unwrap();
/// assert_eq!((r.logic, r.computation), (8.0, 9.5));
///
/// let r = parse_rubric("Logic: 7/10\nComputation: 12").unwrap();
/// assert_eq!((r.logic, r.computation), (7.0, 12.0)); // clamped later
/// ```
pub fn parse_rubric(response: &str) -> Option<RubricReading> {
    parse_rubric_json(response).or_else(|| parse_rubric_lines(response))
}

/// First JSON object in the response that carries both axes.
///
/// Braces in the surrounding prose (an echoed `\boxed{73}`, say) are skipped
/// by trying every `{` as a start and reading one value from there.
fn parse_rubric_json(response: &str) -> Option<RubricReading> {
    response.match_indices('{').find_map(|(start, _)| {
        let value = serde_json::Deserializer::from_str(&response[start..])
            .into_iter::<serde_json::Value>()
            .next()?
            .ok()?;
        reading_from_value(&value, response)
    })
}

fn reading_from_value(value: &serde_json::Value, response: &str) -> Option<RubricReading> {
    if !value.is_object() {
        return None;
    }
    // Some critics nest the axes under "scores"
    let axes = value.get("scores").filter(|v| v.is_object()).unwrap_or(value);

    let logic = lookup_number(axes, LOGIC_KEYS)?;
    let computation = lookup_number(axes, COMPUTATION_KEYS)?;
    let rationale = RATIONALE_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| response.trim().to_string());

    Some(RubricReading {
        logic,
        computation,
        rationale,
    })
}

fn lookup_number(value: &serde_json::Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let field = value.get(*key)?;
        field
            .as_f64()
            .or_else(|| field.as_str().and_then(|s| s.trim().parse().ok()))
            .or_else(|| field.get("score").and_then(|s| s.as_f64()))
    })
}

fn parse_rubric_lines(response: &str) -> Option<RubricReading> {
    let logic = LOGIC_LINE
        .captures(response)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())?;
    let computation = COMPUTATION_LINE
        .captures(response)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())?;

    Some(RubricReading {
        logic,
        computation,
        rationale: response.trim().to_string(),
    })
}
