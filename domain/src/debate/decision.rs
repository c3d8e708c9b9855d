//! Final decision value objects

use super::answer::{Answer, NormalizedValue};
use super::candidate::CandidateId;
use serde::{Deserialize, Serialize};

/// How the final answer was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionMethod {
    /// A unique largest group of agreeing candidates
    #[serde(rename = "majority")]
    Majority,
    /// Largest groups tied; the best-scored tied candidate decided
    #[serde(rename = "score-tiebreak")]
    ScoreTieBreak,
    /// Score-weighted vote
    #[serde(rename = "weighted")]
    Weighted,
    /// Every candidate failed the quality gate; the best-scored one decided
    #[serde(rename = "score-fallback")]
    ScoreFallback,
    /// No round had any parsed candidate
    #[serde(rename = "no-consensus")]
    NoConsensus,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::Majority => "majority",
            ResolutionMethod::ScoreTieBreak => "score-tiebreak",
            ResolutionMethod::Weighted => "weighted",
            ResolutionMethod::ScoreFallback => "score-fallback",
            ResolutionMethod::NoConsensus => "no-consensus",
        }
    }
}

impl std::fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Support for one distinct answer in the deciding round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerTally {
    pub value: NormalizedValue,
    /// Number of candidates whose vote counted for this value
    pub votes: usize,
    /// Accumulated weight, for weighted policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// The single outcome of a debate (Value Object)
///
/// # Example
///
/// ```
/// use debate_domain::debate::decision::{FinalDecision, ResolutionMethod};
///
/// let decision = FinalDecision::no_consensus();
/// assert!(decision.answer.is_unparsed());
/// assert_eq!(decision.method, ResolutionMethod::NoConsensus);
/// assert_eq!(decision.method.to_string(), "no-consensus");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub answer: Answer,
    /// Round whose candidates produced the answer
    pub derivation_round: Option<usize>,
    pub method: ResolutionMethod,
    /// Candidate whose literal is reported as the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<CandidateId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tally: Vec<AnswerTally>,
}

impl FinalDecision {
    pub fn resolved(
        answer: Answer,
        derivation_round: usize,
        method: ResolutionMethod,
        winner: CandidateId,
    ) -> Self {
        Self {
            answer,
            derivation_round: Some(derivation_round),
            method,
            winner: Some(winner),
            tally: Vec::new(),
        }
    }

    /// The valid terminal outcome when nothing could be parsed
    pub fn no_consensus() -> Self {
        Self {
            answer: Answer::Unparsed,
            derivation_round: None,
            method: ResolutionMethod::NoConsensus,
            winner: None,
            tally: Vec::new(),
        }
    }

    pub fn with_tally(mut self, tally: Vec<AnswerTally>) -> Self {
        self.tally = tally;
        self
    }

    pub fn is_no_consensus(&self) -> bool {
        self.method == ResolutionMethod::NoConsensus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serialization_matches_display() {
        for method in [
            ResolutionMethod::Majority,
            ResolutionMethod::ScoreTieBreak,
            ResolutionMethod::Weighted,
            ResolutionMethod::ScoreFallback,
            ResolutionMethod::NoConsensus,
        ] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
    }

    #[test]
    fn test_no_consensus() {
        let decision = FinalDecision::no_consensus();
        assert!(decision.is_no_consensus());
        assert!(decision.derivation_round.is_none());
        assert!(decision.winner.is_none());
    }
}
