//! Replay Debate use case
//!
//! Re-resolves a saved transcript without calling the oracle.

use debate_domain::{DomainError, FinalDecision, ResolverSettings, TranscriptExport};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while replaying a transcript
#[derive(Error, Debug)]
pub enum ReplayDebateError {
    #[error("Saved transcript is invalid: {0}")]
    InvalidTranscript(#[from] DomainError),
}

/// Output of a replay
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// The transcript with the freshly computed decision
    pub export: TranscriptExport,
    /// The decision stored in the file
    pub recorded: FinalDecision,
}

impl ReplayOutcome {
    /// Whether the replayed decision matches the stored one
    pub fn matches_recorded(&self) -> bool {
        self.export.decision == self.recorded
    }
}

/// Use case for resolving a saved transcript again
pub struct ReplayDebateUseCase {
    resolver: ResolverSettings,
}

impl ReplayDebateUseCase {
    pub fn new(resolver: ResolverSettings) -> Self {
        Self { resolver }
    }

    pub fn execute(&self, saved: TranscriptExport) -> Result<ReplayOutcome, ReplayDebateError> {
        let transcript = saved.to_transcript()?;
        let policy = self.resolver.build();
        let decision = policy.resolve(&transcript);

        info!(
            "Replayed {} rounds with {} resolver: {} via {}",
            transcript.len(),
            policy.name(),
            decision.answer,
            decision.method
        );

        Ok(ReplayOutcome {
            export: TranscriptExport::new(&transcript, decision),
            recorded: saved.decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        AgentId, Answer, Candidate, CandidateId, Problem, ResolutionMethod, ResolverKind,
        RoundRecord, Score, StrategyTag, Transcript,
    };

    fn saved() -> TranscriptExport {
        let answers = [("\\boxed{25}", 6.5, 8.0), ("\\boxed{25}", 8.0, 10.0), ("\\boxed{73}", 9.0, 10.0)];
        let mut candidates = Vec::new();
        let mut scores = Vec::new();
        for (i, (text, logic, computation)) in answers.iter().enumerate() {
            candidates.push(Candidate::from_response(AgentId(i), 1, StrategyTag::Direct, *text).0);
            scores.push(Score::new(CandidateId::new(1, AgentId(i)), *logic, *computation, "ok"));
        }
        let mut transcript = Transcript::new(Problem::new("q").unwrap());
        transcript
            .append(RoundRecord::close(1, candidates, scores).unwrap())
            .unwrap();
        let decision = ResolverSettings::default().build().resolve(&transcript);
        TranscriptExport::new(&transcript, decision)
    }

    #[test]
    fn test_replay_matches_recorded_decision() {
        let outcome = ReplayDebateUseCase::new(ResolverSettings::default())
            .execute(saved())
            .unwrap();
        assert!(outcome.matches_recorded());
        assert_eq!(outcome.export.decision.answer, Answer::from_literal("73"));
        assert_eq!(outcome.export.decision.method, ResolutionMethod::ScoreTieBreak);
    }

    #[test]
    fn test_replay_with_other_policy() {
        let settings = ResolverSettings::default().with_kind(ResolverKind::Weighted);
        let outcome = ReplayDebateUseCase::new(settings).execute(saved()).unwrap();
        assert_eq!(outcome.export.decision.method, ResolutionMethod::Weighted);
        assert_eq!(outcome.export.rounds.len(), 1);
    }

    #[test]
    fn test_replay_rejects_broken_transcript() {
        let mut broken = saved();
        broken.rounds.clear();
        broken.rounds.push(saved().rounds[0].clone());
        broken.rounds.push(saved().rounds[0].clone());
        let err = ReplayDebateUseCase::new(ResolverSettings::default())
            .execute(broken)
            .unwrap_err();
        assert!(matches!(err, ReplayDebateError::InvalidTranscript(_)));
    }
}
