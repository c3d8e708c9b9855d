//! Per-round solver context

use super::round::RoundRecord;
use crate::core::problem::Problem;

/// What a solver sees when producing its candidate for a round
///
/// Round 1 sees only the problem. Every later round sees the problem plus the
/// complete previous round: all candidates, their scores and rationales.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateContext {
    pub problem: Problem,
    pub round: usize,
    pub prior: Option<RoundRecord>,
}

impl DebateContext {
    pub fn initial(problem: Problem) -> Self {
        Self {
            problem,
            round: 1,
            prior: None,
        }
    }

    /// Context for the round following `prior`
    pub fn revision(problem: Problem, prior: RoundRecord) -> Self {
        Self {
            problem,
            round: prior.round() + 1,
            prior: Some(prior),
        }
    }

    /// Build the context for `round` from the last closed round, if any
    pub fn for_round(problem: Problem, prior: Option<&RoundRecord>) -> Self {
        match prior {
            Some(record) => Self::revision(problem, record.clone()),
            None => Self::initial(problem),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.prior.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::candidate::{AgentId, Candidate, CandidateId};
    use crate::debate::rubric::Score;
    use crate::debate::strategy::StrategyTag;

    #[test]
    fn test_round_numbers() {
        let problem = Problem::new("1 + 1?").unwrap();
        let initial = DebateContext::for_round(problem.clone(), None);
        assert!(initial.is_initial());
        assert_eq!(initial.round, 1);

        let (candidate, _) =
            Candidate::from_response(AgentId(0), 1, StrategyTag::Direct, "\\boxed{2}");
        let score = Score::new(CandidateId::new(1, AgentId(0)), 9.0, 9.0, "ok");
        let record = RoundRecord::close(1, vec![candidate], vec![score]).unwrap();

        let revision = DebateContext::for_round(problem, Some(&record));
        assert_eq!(revision.round, 2);
        assert_eq!(revision.prior.as_ref(), Some(&record));
    }
}
