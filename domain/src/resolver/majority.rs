//! Credibility-gated majority vote

use super::{ResolutionPolicy, decide, group_by_answer};
use crate::debate::{FinalDecision, ResolutionMethod, RoundRecord};

/// Majority of normalized answers, ties broken by score
///
/// Only candidates whose mean rubric score reaches `vote_threshold` vote.
/// When nobody in the round reaches it, every parsed candidate votes. A unique
/// largest group wins outright; otherwise the tied group holding the highest
/// `logic + computation` wins, and an exact score tie goes to the lowest agent
/// index.
///
/// # Example
///
/// ```
/// use debate_domain::resolver::{MajorityResolver, ResolutionPolicy};
///
/// let resolver = MajorityResolver::default();
/// assert_eq!(resolver.name(), "majority");
/// assert_eq!(resolver.vote_threshold(), 7.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorityResolver {
    vote_threshold: f64,
}

impl MajorityResolver {
    /// Upper band of the critic rubric
    pub const DEFAULT_VOTE_THRESHOLD: f64 = 7.5;

    pub fn new(vote_threshold: f64) -> Self {
        Self { vote_threshold }
    }

    pub fn vote_threshold(&self) -> f64 {
        self.vote_threshold
    }
}

impl Default for MajorityResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VOTE_THRESHOLD)
    }
}

impl ResolutionPolicy for MajorityResolver {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn resolve_round(&self, round: &RoundRecord) -> Option<FinalDecision> {
        let parsed: Vec<_> = round.entries().filter(|(c, _)| c.is_parsed()).collect();
        if parsed.is_empty() {
            return None;
        }

        let credible: Vec<_> = parsed
            .iter()
            .copied()
            .filter(|(_, s)| s.mean() >= self.vote_threshold)
            .collect();
        let voters = if credible.is_empty() { parsed } else { credible };

        let groups = group_by_answer(voters, |_| 1.0);
        let top_votes = groups.iter().map(|g| g.votes).max()?;
        let leaders: Vec<_> = groups.iter().filter(|g| g.votes == top_votes).collect();

        let (winner, method) = if let [only] = leaders.as_slice() {
            (*only, ResolutionMethod::Majority)
        } else {
            let best = leaders
                .iter()
                .copied()
                .reduce(|best, g| if g.outscores(best) { g } else { best })?;
            (best, ResolutionMethod::ScoreTieBreak)
        };

        let tally = groups.iter().map(|g| g.tally(false)).collect();
        Some(decide(round, winner, method, tally))
    }
}
