//! Prompt templates for the debate flow

use crate::core::problem::Problem;
use crate::debate::{AgentId, Candidate, DebateContext, RoundRecord, Score, StrategyTag};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System framing for a solver slot
    pub fn solver_system(strategy: StrategyTag) -> &'static str {
        match strategy {
            StrategyTag::Direct => {
                r#"You are a careful logician solving arithmetic word problems.
Derive the answer step by step, stating every quantity you use and every operation you apply.
Check each intermediate result before moving on."#
            }
            StrategyTag::Programmatic => {
                r#"You are a computational engine solving arithmetic word problems.
First translate the problem into a short Python program that defines every variable explicitly and uses no magic numbers.
Then trace the program by hand and deduce its result. Do not rely on natural-language shortcuts."#
            }
            StrategyTag::Contrastive => {
                r#"You are a pathological skeptic solving arithmetic word problems.
Assume the intuitive answer is WRONG. First list the plausible wrong approaches and traps:
unit conversions, boundary errors and negative constraints such as "remaining" or "without".
Then solve carefully while avoiding every trap you listed."#
            }
            StrategyTag::DependencyMap => {
                r#"You are a semantic linguist solving arithmetic word problems.
Before calculating, map every numerical entity to its semantic role (cost, duration, count, rate)
and state which quantities depend on which. Resolve any ambiguity, then calculate."#
            }
        }
    }

    /// Round-one prompt: the problem only
    pub fn initial_prompt(problem: &Problem) -> String {
        format!(
            r#"Problem: {}

Solve the problem. End your response with the final answer in the form \boxed{{answer}}, using exactly one \boxed{{}}."#,
            problem
        )
    }

    /// Revision prompt for rounds after the first.
    ///
    /// Contains every candidate and score of `prior` verbatim.
    pub fn revision_prompt(problem: &Problem, prior: &RoundRecord, agent: AgentId) -> String {
        let mut prompt = format!("Problem: {}\n", problem);

        let own = prior.entries().find(|(c, _)| c.agent == agent);
        if let Some((candidate, score)) = own {
            prompt.push_str("\n=== Your previous solution ===\n");
            push_entry(&mut prompt, candidate, score);
        }

        prompt.push_str("\n=== Solutions from the other agents ===\n");
        for (candidate, score) in prior.entries().filter(|(c, _)| c.agent != agent) {
            prompt.push_str(&format!("\n--- {} ({}) ---\n", candidate.agent, candidate.strategy));
            push_entry(&mut prompt, candidate, score);
        }

        let own_total = own.map(|(_, s)| s.total());
        let is_best = match (own_total, prior.best_total()) {
            (Some(own), Some(best)) => own >= best,
            _ => false,
        };

        if is_best {
            prompt.push_str(
                r#"
Your solution received the highest score in the previous round.
Keep your approach, re-verify every step against the critiques above, and correct only genuine mistakes."#,
            );
        } else {
            prompt.push_str(
                r#"
Other solutions scored higher than yours in the previous round.
Study the higher-scored solutions and their critiques, find the error in your own reasoning, and solve again."#,
            );
        }

        prompt.push_str(
            "\n\nEnd your response with the final answer in the form \\boxed{answer}, using exactly one \\boxed{}.",
        );
        prompt
    }

    /// Solver prompt for any round
    pub fn solver_prompt(context: &DebateContext, agent: AgentId) -> String {
        match &context.prior {
            Some(prior) => Self::revision_prompt(&context.problem, prior, agent),
            None => Self::initial_prompt(&context.problem),
        }
    }

    /// System prompt for the critic
    pub fn critic_system() -> &'static str {
        r#"You are a strict grader of arithmetic solutions.
Grade the logic (is the setup and reasoning right?) and the computation (is the arithmetic right?) separately, each from 0 to 10.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt asking the critic to grade one candidate
    pub fn critic_prompt(problem: &Problem, candidate: &Candidate, peers_disagree: bool) -> String {
        let answer = candidate
            .answer
            .display_literal()
            .unwrap_or("(no final answer found)");

        let mut prompt = format!(
            r#"Problem: {}

Solution to grade:
{}

Extracted final answer: {}
"#,
            problem,
            solution_text(candidate),
            answer
        );

        if peers_disagree {
            prompt.push_str(
                "\nNote: the agents disagree on the final answer this round. Check the setup carefully.\n",
            );
        }

        prompt.push_str(
            r#"
Respond with exactly this JSON:
{"logic": <0-10>, "computation": <0-10>, "rationale": "<one or two sentences naming the main flaw, if any>"}"#,
        );
        prompt
    }
}

fn solution_text(candidate: &Candidate) -> String {
    match &candidate.failure {
        Some(reason) => format!("(no response: {})", reason),
        None => candidate.raw_text.clone(),
    }
}

fn push_entry(prompt: &mut String, candidate: &Candidate, score: &Score) {
    prompt.push_str(&solution_text(candidate));
    prompt.push_str(&format!(
        "\nFinal answer: {}\nScore: logic {}/10, computation {}/10\nCritique: {}\n",
        candidate.answer.display_literal().unwrap_or("Unparsed"),
        score.logic,
        score.computation,
        score.rationale
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::CandidateId;

    fn problem() -> Problem {
        Problem::new("Tom has 3 apples and buys 4 more. How many does he have?").unwrap()
    }

    fn prior() -> RoundRecord {
        let texts = [
            "3 + 4 = 7. \\boxed{7}",
            "apples = 3 + 4\nprint(apples) # 7\n\\boxed{7}",
            "Trap: 'more' means add. \\boxed{12}",
        ];
        let mut candidates = Vec::new();
        let mut scores = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            let (c, _) = Candidate::from_response(AgentId(i), 1, StrategyTag::ROTATION[i], *text);
            candidates.push(c);
            scores.push(Score::new(
                CandidateId::new(1, AgentId(i)),
                [9.0, 8.0, 3.0][i],
                [10.0, 9.0, 2.5][i],
                format!("rationale number {}", i),
            ));
        }
        RoundRecord::close(1, candidates, scores).unwrap()
    }

    #[test]
    fn test_initial_prompt_contains_problem() {
        let prompt = PromptTemplate::initial_prompt(&problem());
        assert!(prompt.contains("Tom has 3 apples"));
        assert!(prompt.contains("\\boxed{answer}"));
    }

    #[test]
    fn test_revision_contains_prior_round_verbatim() {
        let prior = prior();
        let context = DebateContext::revision(problem(), prior.clone());
        for agent in 0..3 {
            let prompt = PromptTemplate::solver_prompt(&context, AgentId(agent));
            for (candidate, score) in prior.entries() {
                assert!(prompt.contains(&candidate.raw_text));
                assert!(prompt.contains(&score.rationale));
                assert!(prompt.contains(&format!(
                    "logic {}/10, computation {}/10",
                    score.logic, score.computation
                )));
            }
        }
    }

    #[test]
    fn test_revision_instruction_is_score_aware() {
        let prior = prior();
        let best = PromptTemplate::revision_prompt(&problem(), &prior, AgentId(0));
        assert!(best.contains("highest score"));

        let worst = PromptTemplate::revision_prompt(&problem(), &prior, AgentId(2));
        assert!(worst.contains("scored higher than yours"));
    }

    #[test]
    fn test_failed_candidate_is_shown_as_failure() {
        let failed = Candidate::failed(AgentId(1), 1, StrategyTag::Direct, "Timeout after 60s");
        let prompt = PromptTemplate::critic_prompt(&problem(), &failed, false);
        assert!(prompt.contains("(no response: Timeout after 60s)"));
        assert!(prompt.contains("(no final answer found)"));
        assert!(!prompt.contains("disagree"));
    }

    #[test]
    fn test_critic_prompt_requests_json() {
        let (candidate, _) =
            Candidate::from_response(AgentId(0), 1, StrategyTag::Direct, "\\boxed{7}");
        let prompt = PromptTemplate::critic_prompt(&problem(), &candidate, true);
        assert!(prompt.contains("\"logic\""));
        assert!(prompt.contains("Extracted final answer: 7"));
        assert!(prompt.contains("disagree"));
    }

    #[test]
    fn test_every_strategy_has_framing() {
        for tag in [
            StrategyTag::Direct,
            StrategyTag::Programmatic,
            StrategyTag::Contrastive,
            StrategyTag::DependencyMap,
        ] {
            assert!(!PromptTemplate::solver_system(tag).is_empty());
        }
    }
}
