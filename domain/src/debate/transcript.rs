//! Append-only debate transcript and its export form

use super::decision::FinalDecision;
use super::round::RoundRecord;
use crate::core::error::DomainError;
use crate::core::problem::Problem;
use serde::{Deserialize, Serialize};

/// Ordered history of closed rounds for one problem (Entity)
///
/// Rounds can only be appended, in order, starting at round 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    problem: Problem,
    rounds: Vec<RoundRecord>,
}

impl Transcript {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            rounds: Vec::new(),
        }
    }

    /// Append the next closed round
    pub fn append(&mut self, record: RoundRecord) -> Result<(), DomainError> {
        let expected = self.rounds.len() + 1;
        if record.round() != expected {
            return Err(DomainError::RoundOutOfOrder {
                expected_after: self.rounds.len(),
                actual: record.round(),
            });
        }
        self.rounds.push(record);
        Ok(())
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn round(&self, number: usize) -> Option<&RoundRecord> {
        number.checked_sub(1).and_then(|i| self.rounds.get(i))
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Read-only serialization of a finished debate
///
/// This is what report renderers and the replay path consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptExport {
    pub problem: Problem,
    pub rounds: Vec<RoundRecord>,
    pub decision: FinalDecision,
}

impl TranscriptExport {
    pub fn new(transcript: &Transcript, decision: FinalDecision) -> Self {
        Self {
            problem: transcript.problem.clone(),
            rounds: transcript.rounds.clone(),
            decision,
        }
    }

    /// Rebuild a transcript, re-checking every round invariant.
    ///
    /// Deserialization alone does not enforce them, so a hand-edited file
    /// is rejected here rather than resolved. Every round must also hold
    /// one candidate per agent of the same fixed pool.
    pub fn to_transcript(&self) -> Result<Transcript, DomainError> {
        let mut transcript = Transcript::new(self.problem.clone());
        let pool_size = self.rounds.first().map_or(0, |r| r.candidates().len());
        for record in &self.rounds {
            if record.candidates().len() != pool_size {
                return Err(DomainError::IncompleteRound {
                    round: record.round(),
                    message: format!(
                        "has {} candidates but round 1 has {}",
                        record.candidates().len(),
                        pool_size
                    ),
                });
            }
            let reclosed = RoundRecord::close(
                record.round(),
                record.candidates().to_vec(),
                record.scores().to_vec(),
            )?;
            transcript.append(reclosed)?;
        }
        Ok(transcript)
    }
}
