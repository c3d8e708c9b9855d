//! Score-weighted vote

use super::{AnswerGroup, ResolutionPolicy, decide, group_by_answer};
use crate::debate::{FinalDecision, ResolutionMethod, RoundRecord};

/// Each parsed candidate whose mean score reaches `threshold` adds
/// `exp(alpha * mean / 10)` to its answer; the heaviest answer wins.
///
/// When nobody reaches the threshold, the single highest-scored parsed
/// candidate decides (`score-fallback`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedResolver {
    alpha: f64,
    threshold: f64,
}

impl WeightedResolver {
    pub const DEFAULT_ALPHA: f64 = 1.0;
    pub const DEFAULT_THRESHOLD: f64 = 4.0;

    pub fn new(alpha: f64, threshold: f64) -> Self {
        Self { alpha, threshold }
    }

    fn weight(&self, mean: f64) -> f64 {
        (self.alpha * mean / 10.0).exp()
    }
}

impl Default for WeightedResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA, Self::DEFAULT_THRESHOLD)
    }
}

fn heavier(a: &AnswerGroup<'_>, b: &AnswerGroup<'_>) -> bool {
    match a.weight.total_cmp(&b.weight) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => a.outscores(b),
    }
}

impl ResolutionPolicy for WeightedResolver {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn resolve_round(&self, round: &RoundRecord) -> Option<FinalDecision> {
        let parsed: Vec<_> = round.entries().filter(|(c, _)| c.is_parsed()).collect();
        if parsed.is_empty() {
            return None;
        }

        let eligible: Vec<_> = parsed
            .iter()
            .copied()
            .filter(|(_, s)| s.mean() >= self.threshold)
            .collect();

        if eligible.is_empty() {
            // Each candidate stands alone; the best mean decides
            let singles = group_by_answer(parsed.iter().copied(), |s| s.mean());
            let best = singles
                .iter()
                .reduce(|best, g| if g.outscores(best) { g } else { best })?;
            let tally = singles.iter().map(|g| g.tally(false)).collect();
            return Some(decide(round, best, ResolutionMethod::ScoreFallback, tally));
        }

        let groups = group_by_answer(eligible, |s| self.weight(s.mean()));
        let winner = groups
            .iter()
            .reduce(|best, g| if heavier(g, best) { g } else { best })?;
        let tally = groups.iter().map(|g| g.tally(true)).collect();
        Some(decide(round, winner, ResolutionMethod::Weighted, tally))
    }
}
