//! Final answer resolution
//!
//! A resolver is a pure function from a completed [`Transcript`] to one
//! [`FinalDecision`]. It never calls the oracle, so a saved transcript can be
//! re-resolved at any time with the same result.
//!
//! Policies only decide a single round. The shared [`ResolutionPolicy::resolve`]
//! walks the transcript from the last round backwards and takes the first
//! round that yields a decision; a round yields nothing when every candidate
//! in it is unparsed.

mod majority;
mod weighted;

pub use majority::MajorityResolver;
pub use weighted::WeightedResolver;

use crate::debate::{
    AnswerTally, Candidate, FinalDecision, NormalizedValue, RoundRecord, Score, Transcript,
};
use serde::{Deserialize, Serialize};

/// Pluggable resolution policy
pub trait ResolutionPolicy: Send + Sync {
    /// Short identifier of the policy
    fn name(&self) -> &'static str;

    /// Decide one round, or `None` when it has no parsed candidate
    fn resolve_round(&self, round: &RoundRecord) -> Option<FinalDecision>;

    /// Decide the whole transcript, falling back to earlier rounds
    fn resolve(&self, transcript: &Transcript) -> FinalDecision {
        transcript
            .rounds()
            .iter()
            .rev()
            .find_map(|round| self.resolve_round(round))
            .unwrap_or_else(FinalDecision::no_consensus)
    }
}

/// Available resolution policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Credibility-gated majority vote with score tie-break
    #[default]
    Majority,
    /// Score-weighted vote
    Weighted,
}

impl ResolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverKind::Majority => "majority",
            ResolverKind::Weighted => "weighted",
        }
    }
}

impl std::fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" | "vote" => Ok(ResolverKind::Majority),
            "weighted" | "weighted-vote" | "weighted_vote" => Ok(ResolverKind::Weighted),
            other => Err(format!(
                "Unknown resolver: {}. Valid: majority, weighted",
                other
            )),
        }
    }
}

/// Policy choice plus its tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverSettings {
    pub kind: ResolverKind,
    /// Minimum mean rubric score for a vote to count (majority policy)
    pub vote_threshold: f64,
    /// Sharpness of the score weighting (weighted policy)
    pub weighted_alpha: f64,
    /// Minimum mean rubric score to carry weight (weighted policy)
    pub weighted_threshold: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            kind: ResolverKind::Majority,
            vote_threshold: MajorityResolver::DEFAULT_VOTE_THRESHOLD,
            weighted_alpha: WeightedResolver::DEFAULT_ALPHA,
            weighted_threshold: WeightedResolver::DEFAULT_THRESHOLD,
        }
    }
}

impl ResolverSettings {
    pub fn with_kind(mut self, kind: ResolverKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build the configured policy
    pub fn build(&self) -> Box<dyn ResolutionPolicy> {
        match self.kind {
            ResolverKind::Majority => Box::new(MajorityResolver::new(self.vote_threshold)),
            ResolverKind::Weighted => Box::new(WeightedResolver::new(
                self.weighted_alpha,
                self.weighted_threshold,
            )),
        }
    }
}

/// Candidates of one round that share a normalized answer
#[derive(Debug)]
struct AnswerGroup<'a> {
    value: &'a NormalizedValue,
    votes: usize,
    weight: f64,
    /// Highest-scored member; the lowest agent index wins exact ties
    best: (&'a Candidate, &'a Score),
}

impl AnswerGroup<'_> {
    fn best_total(&self) -> f64 {
        self.best.1.total()
    }

    /// Whether this group beats `other` on the score tie-break
    fn outscores(&self, other: &AnswerGroup<'_>) -> bool {
        match self.best_total().total_cmp(&other.best_total()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.best.0.agent < other.best.0.agent,
        }
    }

    fn tally(&self, weighted: bool) -> AnswerTally {
        AnswerTally {
            value: self.value.clone(),
            votes: self.votes,
            weight: weighted.then_some(self.weight),
        }
    }
}

/// Group voters by normalized answer, in order of first appearance.
///
/// Unparsed candidates are skipped.
fn group_by_answer<'a>(
    voters: impl IntoIterator<Item = (&'a Candidate, &'a Score)>,
    weight_of: impl Fn(&Score) -> f64,
) -> Vec<AnswerGroup<'a>> {
    let mut groups: Vec<AnswerGroup<'a>> = Vec::new();
    for (candidate, score) in voters {
        let Some(value) = candidate.answer.normalized() else {
            continue;
        };
        match groups.iter_mut().find(|g| g.value == value) {
            Some(group) => {
                group.votes += 1;
                group.weight += weight_of(score);
                if score.total() > group.best.1.total() {
                    group.best = (candidate, score);
                }
            }
            None => groups.push(AnswerGroup {
                value,
                votes: 1,
                weight: weight_of(score),
                best: (candidate, score),
            }),
        }
    }
    groups
}

fn decide(
    round: &RoundRecord,
    winner: &AnswerGroup<'_>,
    method: crate::debate::ResolutionMethod,
    tally: Vec<AnswerTally>,
) -> FinalDecision {
    let (candidate, _) = winner.best;
    FinalDecision::resolved(candidate.answer.clone(), round.round(), method, candidate.id())
        .with_tally(tally)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::problem::Problem;
    use crate::debate::{AgentId, Candidate, CandidateId, RoundRecord, Score, StrategyTag, Transcript};

    /// Build a closed round from `(raw_text, logic, computation)` triples
    pub fn round(number: usize, entries: &[(&str, f64, f64)]) -> RoundRecord {
        let mut candidates = Vec::new();
        let mut scores = Vec::new();
        for (i, (text, logic, computation)) in entries.iter().enumerate() {
            let agent = AgentId(i);
            let candidate = if text.is_empty() {
                Candidate::failed(agent, number, StrategyTag::Direct, "Timeout")
            } else {
                Candidate::from_response(agent, number, StrategyTag::Direct, *text).0
            };
            candidates.push(candidate);
            scores.push(Score::new(
                CandidateId::new(number, agent),
                *logic,
                *computation,
                "graded",
            ));
        }
        RoundRecord::close(number, candidates, scores).unwrap()
    }

    pub fn transcript(rounds: Vec<RoundRecord>) -> Transcript {
        let mut transcript = Transcript::new(Problem::new("test problem").unwrap());
        for round in rounds {
            transcript.append(round).unwrap();
        }
        transcript
    }
}
