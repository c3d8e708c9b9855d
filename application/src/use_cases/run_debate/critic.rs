//! Critic adapter: one grading request per candidate, always yielding a score.

use crate::ports::oracle::{OracleError, OracleRequest, OracleRole};
use debate_domain::{Candidate, CandidateId, Problem, PromptTemplate, Score, parse_rubric};
use tracing::warn;

/// Builds critic requests and reads critic responses into rubric scores
pub struct CriticAdapter;

impl CriticAdapter {
    pub fn request(problem: &Problem, candidate: &Candidate, peers_disagree: bool) -> OracleRequest {
        OracleRequest::new(
            OracleRole::Critic {
                target: candidate.id(),
            },
            PromptTemplate::critic_system(),
            PromptTemplate::critic_prompt(problem, candidate, peers_disagree),
        )
    }

    /// Read a critic result into a score.
    ///
    /// Total: a failed call or a response without both rubric axes yields
    /// the minimal score. Out-of-range values are clamped.
    pub fn score(target: CandidateId, result: Result<String, OracleError>) -> Score {
        match result {
            Ok(text) => match parse_rubric(&text) {
                Some(reading) => {
                    let score = Score::from_reading(target, reading);
                    if score.clamped {
                        warn!("Critic score for {} was out of range and got clamped", target);
                    }
                    score
                }
                None => {
                    warn!("Critic response for {} had no readable rubric", target);
                    Score::failed(target, "response had no logic/computation scores")
                }
            },
            Err(e) => Score::failed(target, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{AgentId, StrategyTag};
    use debate_domain::debate::{RUBRIC_MAX, RUBRIC_MIN};

    fn target() -> CandidateId {
        CandidateId::new(1, AgentId(2))
    }

    #[test]
    fn test_request_targets_candidate() {
        let problem = Problem::new("5 - 2?").unwrap();
        let (candidate, _) =
            Candidate::from_response(AgentId(2), 1, StrategyTag::Direct, "\\boxed{3}");
        let request = CriticAdapter::request(&problem, &candidate, false);
        assert_eq!(request.role, OracleRole::Critic { target: target() });
        assert!(request.user.contains("\\boxed{3}"));
    }

    #[test]
    fn test_score_from_json() {
        let score = CriticAdapter::score(
            target(),
            Ok(r#"{"logic": 9, "computation": 7.5, "rationale": "Minor slip."}"#.to_string()),
        );
        assert_eq!((score.logic, score.computation), (9.0, 7.5));
        assert_eq!(score.rationale, "Minor slip.");
        assert!(!score.substituted);
    }

    #[test]
    fn test_score_when_critic_quotes_boxed_answer() {
        let response = "The candidate's \\boxed{73} is right.\n\
                        {\"logic\": 9, \"computation\": 8, \"rationale\": \"ok\"}\n\
                        So \\boxed{73} holds.";
        let score = CriticAdapter::score(target(), Ok(response.to_string()));
        assert!(!score.substituted);
        assert_eq!((score.logic, score.computation), (9.0, 8.0));
        assert_eq!(score.rationale, "ok");
    }

    #[test]
    fn test_out_of_range_clamped() {
        let score = CriticAdapter::score(
            target(),
            Ok(r#"{"logic": 12, "computation": -1}"#.to_string()),
        );
        assert_eq!((score.logic, score.computation), (RUBRIC_MAX, RUBRIC_MIN));
        assert!(score.clamped);
    }

    #[test]
    fn test_failure_yields_minimal_score() {
        let score = CriticAdapter::score(
            target(),
            Err(OracleError::Unavailable("connection refused".to_string())),
        );
        assert!(score.substituted);
        assert_eq!(score.total(), 0.0);
        assert!(score.rationale.contains("connection refused"));
    }

    #[test]
    fn test_unreadable_response_yields_minimal_score() {
        let score = CriticAdapter::score(target(), Ok("Looks right to me.".to_string()));
        assert!(score.substituted);
        assert_eq!(score.target, target());
    }
}
