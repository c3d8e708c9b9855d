//! Candidate entities
//!
//! A [`Candidate`] is one agent's proposal for one round. It is created once
//! and never mutated afterwards.

use super::answer::Answer;
use super::extraction::{Extraction, scan_answer};
use super::strategy::StrategyTag;
use serde::{Deserialize, Serialize};

/// Index of an agent slot in the pool (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// Identifies a candidate: one agent in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId {
    pub round: usize,
    pub agent: AgentId,
}

impl CandidateId {
    pub fn new(round: usize, agent: AgentId) -> Self {
        Self { round, agent }
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}/{}", self.round, self.agent)
    }
}

/// One agent's proposed solution for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub agent: AgentId,
    pub round: usize,
    /// Solver text as returned by the oracle (empty on failure)
    pub raw_text: String,
    pub answer: Answer,
    pub strategy: StrategyTag,
    /// Why the oracle call failed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Candidate {
    /// Build a candidate from a successful oracle response.
    ///
    /// Returns the extraction outcome too so callers can log ambiguities.
    pub fn from_response(
        agent: AgentId,
        round: usize,
        strategy: StrategyTag,
        raw_text: impl Into<String>,
    ) -> (Self, Extraction) {
        let raw_text = raw_text.into();
        let extraction = scan_answer(&raw_text);
        let candidate = Self {
            agent,
            round,
            answer: extraction.clone().into_answer(),
            raw_text,
            strategy,
            failure: None,
        };
        (candidate, extraction)
    }

    /// Sentinel candidate substituted for a failed oracle call
    pub fn failed(
        agent: AgentId,
        round: usize,
        strategy: StrategyTag,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            round,
            raw_text: String::new(),
            answer: Answer::Unparsed,
            strategy,
            failure: Some(reason.into()),
        }
    }

    pub fn id(&self) -> CandidateId {
        CandidateId::new(self.round, self.agent)
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn is_parsed(&self) -> bool {
        !self.answer.is_unparsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_extracts_answer() {
        let (candidate, extraction) = Candidate::from_response(
            AgentId(1),
            1,
            StrategyTag::Direct,
            "3 + 4 = 7, so \\boxed{7}",
        );
        assert!(candidate.is_parsed());
        assert!(!candidate.is_failed());
        assert_eq!(candidate.answer.display_literal(), Some("7"));
        assert!(!extraction.is_ambiguous());
    }

    #[test]
    fn test_failed_candidate_is_sentinel() {
        let candidate = Candidate::failed(AgentId(2), 1, StrategyTag::Contrastive, "Timeout");
        assert!(candidate.raw_text.is_empty());
        assert!(candidate.answer.is_unparsed());
        assert_eq!(candidate.failure.as_deref(), Some("Timeout"));
    }

    #[test]
    fn test_candidate_id_display() {
        let id = CandidateId::new(2, AgentId(0));
        assert_eq!(id.to_string(), "r2/agent-0");
    }
}
