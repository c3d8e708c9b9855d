//! Round records
//!
//! A [`RoundRecord`] can only be built closed: every candidate must carry
//! exactly one score, and no score may point at a candidate outside the
//! round.

use super::candidate::{AgentId, Candidate, CandidateId};
use super::rubric::Score;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether the parsed answers among `candidates` take more than one value.
///
/// Unparsed answers are ignored, so one parsed answer next to failures is
/// not a disagreement.
pub fn answers_disagree(candidates: &[Candidate]) -> bool {
    let values: HashSet<_> = candidates
        .iter()
        .filter_map(|c| c.answer.normalized())
        .collect();
    values.len() > 1
}

/// One closed generate + score cycle across all agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    round: usize,
    candidates: Vec<Candidate>,
    scores: Vec<Score>,
}

impl RoundRecord {
    /// Close a round, checking the one-score-per-candidate invariant.
    ///
    /// Candidates are stored ordered by agent index, and scores follow the
    /// same order.
    pub fn close(
        round: usize,
        mut candidates: Vec<Candidate>,
        scores: Vec<Score>,
    ) -> Result<Self, DomainError> {
        let incomplete = |message: String| DomainError::IncompleteRound { round, message };

        candidates.sort_by_key(|c| c.agent);

        let mut seen_agents = HashSet::new();
        for candidate in &candidates {
            if candidate.round != round {
                return Err(incomplete(format!(
                    "candidate {} belongs to round {}",
                    candidate.agent, candidate.round
                )));
            }
            if !seen_agents.insert(candidate.agent) {
                return Err(incomplete(format!(
                    "agent {} produced more than one candidate",
                    candidate.agent
                )));
            }
        }

        let mut ordered = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let mut matching = scores.iter().filter(|s| s.target == candidate.id());
            let score = matching
                .next()
                .ok_or_else(|| incomplete(format!("candidate {} has no score", candidate.id())))?;
            if matching.next().is_some() {
                return Err(incomplete(format!(
                    "candidate {} has more than one score",
                    candidate.id()
                )));
            }
            ordered.push(score.clone());
        }

        if ordered.len() != scores.len() {
            return Err(incomplete(
                "a score targets a candidate outside this round".to_string(),
            ));
        }

        Ok(Self {
            round,
            candidates,
            scores: ordered,
        })
    }

    /// Round number (1-indexed)
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The score attached to a candidate
    pub fn score_for(&self, id: CandidateId) -> Option<&Score> {
        self.scores.iter().find(|s| s.target == id)
    }

    pub fn candidate_for(&self, agent: AgentId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.agent == agent)
    }

    /// Candidates paired with their scores, in agent order
    pub fn entries(&self) -> impl Iterator<Item = (&Candidate, &Score)> {
        self.candidates.iter().zip(self.scores.iter())
    }

    /// Whether at least one candidate has a parsed answer
    pub fn has_parsed(&self) -> bool {
        self.candidates.iter().any(Candidate::is_parsed)
    }

    /// Whether the candidates disagree on the answer
    pub fn has_disagreement(&self) -> bool {
        answers_disagree(&self.candidates)
    }

    /// Highest `logic + computation` in the round
    pub fn best_total(&self) -> Option<f64> {
        self.scores.iter().map(Score::total).reduce(f64::max)
    }
}
