//! Run Debate use case
//!
//! Drives the round controller state machine:
//!
//! | State            | Work                                                     |
//! |------------------|----------------------------------------------------------|
//! | `Generating(r)`  | all N solver calls in parallel, one candidate per slot   |
//! | `Scoring(r)`     | all N critic calls in parallel, one score per candidate  |
//! | `Resolving`      | the resolution policy over the closed rounds             |
//!
//! Rounds are barriers: round `r + 1` starts only after round `r` is closed
//! and appended. Every oracle call has its own timeout and is never retried;
//! a failure is substituted in place so every round still has N candidates
//! and N scores. The controller is the single writer of the transcript.

mod critic;
mod pool;
mod types;

pub use critic::CriticAdapter;
pub use pool::{AgentPool, AgentSlot};
pub use types::{DebateOutcome, DebateStatus, RunDebateError, RunDebateInput};

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, DebateEventKind, NoConversationLogger,
};
use crate::ports::oracle::{Oracle, OracleError, OracleRequest};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use debate_domain::{
    Candidate, DebateContext, DebatePhase, DebateState, Extraction, FinalDecision, Problem,
    RoundRecord, Score, Transcript, TranscriptExport, answers_disagree,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running one debate
pub struct RunDebateUseCase<O: Oracle + 'static> {
    oracle: Arc<O>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<O: Oracle + 'static> RunDebateUseCase<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self {
            oracle,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Record debate events through a structured logger
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token for abandoning the round in flight
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateOutcome, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateOutcome, RunDebateError> {
        let RunDebateInput { problem, config } = input;
        config.validate().map_err(RunDebateError::InvalidConfig)?;

        let pool = AgentPool::from_config(&config);
        let policy = config.resolver.build();
        let timeout = config.per_call_timeout;

        info!(
            "Starting debate with {} agents over {} rounds ({} resolver)",
            pool.len(),
            config.round_count,
            policy.name()
        );
        self.log(ConversationEvent::debate(
            DebateEventKind::DebateStarted,
            json!({
                "problem": problem.text(),
                "agents": pool.len(),
                "rounds": config.round_count,
                "strategies": pool.slots().iter().map(|s| s.strategy.as_str()).collect::<Vec<_>>(),
                "resolver": policy.name(),
            }),
        ));

        let mut transcript = Transcript::new(problem);
        let mut pending: Vec<Candidate> = Vec::new();
        let mut status = DebateStatus::Completed;
        let mut decision = FinalDecision::no_consensus();
        let mut state = DebateState::Init.next(config.round_count);

        loop {
            debug!("Debate state: {}", state);
            match state {
                DebateState::Generating(round) => {
                    let context = DebateContext::for_round(
                        transcript.problem().clone(),
                        transcript.last_round(),
                    );
                    match self
                        .phase_generate(&pool, &context, timeout, progress)
                        .await
                    {
                        Some(candidates) => pending = candidates,
                        None => {
                            status = self.abandon_round(round, progress);
                            state = DebateState::Resolving;
                            continue;
                        }
                    }
                }
                DebateState::Scoring(round) => {
                    let candidates = std::mem::take(&mut pending);
                    let Some(scores) = self
                        .phase_score(transcript.problem(), round, &candidates, timeout, progress)
                        .await
                    else {
                        status = self.abandon_round(round, progress);
                        state = DebateState::Resolving;
                        continue;
                    };

                    let record = RoundRecord::close(round, candidates, scores)
                        .map_err(RunDebateError::Transcript)?;
                    self.log_round_closed(&record);
                    transcript
                        .append(record)
                        .map_err(RunDebateError::Transcript)?;
                }
                DebateState::Resolving => {
                    let rounds = transcript.len();
                    progress.on_phase_start(rounds, DebatePhase::Resolving, 1);
                    decision = policy.resolve(&transcript);
                    info!(
                        "Resolved {} via {} (round {:?})",
                        decision.answer, decision.method, decision.derivation_round
                    );
                    progress.on_phase_complete(rounds, DebatePhase::Resolving);
                    progress.on_resolved(&decision);
                    self.log(ConversationEvent::debate(
                        DebateEventKind::DebateResolved,
                        json!({
                            "answer": decision.answer.display_literal(),
                            "method": decision.method.as_str(),
                            "derivation_round": decision.derivation_round,
                            "winner": decision.winner.map(|w| w.to_string()),
                            "status": status,
                        }),
                    ));
                }
                DebateState::Init | DebateState::Terminal => break,
            }
            state = state.next(config.round_count);
        }

        Ok(DebateOutcome {
            export: TranscriptExport::new(&transcript, decision),
            status,
        })
    }

    /// Generate one candidate per slot, in parallel.
    ///
    /// Returns `None` if the debate was cancelled meanwhile.
    async fn phase_generate(
        &self,
        pool: &AgentPool,
        context: &DebateContext,
        timeout: Duration,
        progress: &dyn ProgressNotifier,
    ) -> Option<Vec<Candidate>> {
        let round = context.round;
        info!("Round {}: generating candidates", round);
        progress.on_phase_start(round, DebatePhase::Generating, pool.len());

        let mut join_set = JoinSet::new();
        for slot in pool.slots() {
            let oracle = Arc::clone(&self.oracle);
            let request = slot.request(context);
            let slot = *slot;

            join_set.spawn(async move {
                let result = Self::invoke_with_timeout(&oracle, &request, timeout).await;
                (slot, result)
            });
        }

        let mut generated: Vec<Option<Candidate>> = vec![None; pool.len()];
        let completed = self
            .join_round(join_set, |(slot, result)| {
                let success = result.is_ok();
                if let Err(e) = &result {
                    warn!("Round {}: {} failed: {}", round, slot.id, e);
                }

                let (candidate, extraction) = slot.candidate(round, result);
                if let Some(extraction) = extraction.as_ref().filter(|e| e.is_ambiguous()) {
                    debug!(
                        "Round {}: {} answer marker {}; recorded as Unparsed",
                        round,
                        slot.id,
                        extraction.label()
                    );
                }

                progress.on_task_complete(round, DebatePhase::Generating, slot.id, success);
                self.log_candidate(&candidate, extraction.as_ref());
                if let Some(entry) = generated.get_mut(slot.id.index()) {
                    *entry = Some(candidate);
                }
            })
            .await;
        if !completed {
            return None;
        }

        progress.on_phase_complete(round, DebatePhase::Generating);
        Some(
            pool.slots()
                .iter()
                .zip(generated)
                .map(|(slot, candidate)| {
                    candidate.unwrap_or_else(|| {
                        Candidate::failed(slot.id, round, slot.strategy, "solver task aborted")
                    })
                })
                .collect(),
        )
    }

    /// Score every candidate of a round, in parallel.
    ///
    /// Returns `None` if the debate was cancelled meanwhile.
    async fn phase_score(
        &self,
        problem: &Problem,
        round: usize,
        candidates: &[Candidate],
        timeout: Duration,
        progress: &dyn ProgressNotifier,
    ) -> Option<Vec<Score>> {
        info!("Round {}: scoring candidates", round);
        progress.on_phase_start(round, DebatePhase::Scoring, candidates.len());

        let peers_disagree = answers_disagree(candidates);
        let mut join_set = JoinSet::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let request = CriticAdapter::request(problem, candidate, peers_disagree);
            let target = candidate.id();

            join_set.spawn(async move {
                let result = Self::invoke_with_timeout(&oracle, &request, timeout).await;
                (index, target, result)
            });
        }

        let mut scored: Vec<Option<Score>> = vec![None; candidates.len()];
        let completed = self
            .join_round(join_set, |(index, target, result)| {
                let success = result.is_ok();
                if let Err(e) = &result {
                    warn!("Round {}: critic of {} failed: {}", round, target.agent, e);
                }

                let score = CriticAdapter::score(target, result);
                progress.on_task_complete(round, DebatePhase::Scoring, target.agent, success);
                self.log_score(&score);
                if let Some(entry) = scored.get_mut(index) {
                    *entry = Some(score);
                }
            })
            .await;
        if !completed {
            return None;
        }

        progress.on_phase_complete(round, DebatePhase::Scoring);
        Some(
            candidates
                .iter()
                .zip(scored)
                .map(|(candidate, score)| {
                    score.unwrap_or_else(|| Score::failed(candidate.id(), "critic task aborted"))
                })
                .collect(),
        )
    }

    /// Wait for every task of a round, handing each result to `on_result`.
    ///
    /// Returns `false` when cancelled; outstanding tasks are aborted.
    async fn join_round<T: Send + 'static>(
        &self,
        mut join_set: JoinSet<T>,
        mut on_result: impl FnMut(T),
    ) -> bool {
        loop {
            let joined = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        join_set.abort_all();
                        return false;
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };

            match joined {
                Some(Ok(value)) => on_result(value),
                Some(Err(e)) => warn!("Task join error: {}", e),
                None => return true,
            }
        }
    }

    fn abandon_round(&self, round: usize, progress: &dyn ProgressNotifier) -> DebateStatus {
        warn!("Debate cancelled during round {}; discarding it", round);
        progress.on_cancelled(round);
        self.log(ConversationEvent::round(
            DebateEventKind::RoundAbandoned,
            round,
            serde_json::Value::Null,
        ));
        DebateStatus::Cancelled { round }
    }

    /// Invoke the oracle, mapping an elapsed timeout to a failure
    async fn invoke_with_timeout(
        oracle: &O,
        request: &OracleRequest,
        timeout: Duration,
    ) -> Result<String, OracleError> {
        match tokio::time::timeout(timeout, oracle.invoke(request)).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(timeout)),
        }
    }

    // ==================== Conversation Log ====================

    fn log(&self, event: ConversationEvent) {
        self.conversation_logger.log(event);
    }

    fn log_candidate(&self, candidate: &Candidate, extraction: Option<&Extraction>) {
        self.log(ConversationEvent::candidate(
            DebateEventKind::CandidateGenerated,
            candidate.id(),
            json!({
                "strategy": candidate.strategy.as_str(),
                "answer": candidate.answer.display_literal(),
                "normalized": candidate.answer.normalized().map(|n| n.as_str()),
                "extraction": extraction.map(Extraction::label),
                "failure": candidate.failure,
                "raw_text": candidate.raw_text,
            }),
        ));
    }

    fn log_score(&self, score: &Score) {
        self.log(ConversationEvent::candidate(
            DebateEventKind::CandidateScored,
            score.target,
            json!({
                "logic": score.logic,
                "computation": score.computation,
                "clamped": score.clamped,
                "substituted": score.substituted,
                "rationale": score.rationale,
            }),
        ));
    }

    fn log_round_closed(&self, record: &RoundRecord) {
        let answers: Vec<_> = record
            .candidates()
            .iter()
            .map(|c| c.answer.display_literal())
            .collect();
        info!("Round {} closed with answers {:?}", record.round(), answers);
        self.log(ConversationEvent::round(
            DebateEventKind::RoundClosed,
            record.round(),
            json!({
                "answers": answers,
                "best_total": record.best_total(),
                "disagreement": record.has_disagreement(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebateConfig;
    use crate::ports::oracle::OracleRole;
    use async_trait::async_trait;
    use debate_domain::{Answer, ResolutionMethod, StrategyTag};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GOOD_GRADE: &str = r#"{"logic": 8, "computation": 8, "rationale": "fine"}"#;

    enum Script {
        Reply(String),
        Fail(OracleError),
        Hang,
        CancelAndHang(CancellationToken),
    }

    fn reply(text: &str) -> Script {
        Script::Reply(text.to_string())
    }

    /// Oracle mock with per-agent response queues for solvers and critics
    #[derive(Default)]
    struct ScriptedOracle {
        solver: Mutex<HashMap<usize, VecDeque<Script>>>,
        critic: Mutex<HashMap<usize, VecDeque<Script>>>,
        requests: Mutex<Vec<OracleRequest>>,
        calls: AtomicUsize,
    }

    impl ScriptedOracle {
        fn solver(self, agent: usize, scripts: Vec<Script>) -> Self {
            self.solver.lock().unwrap().insert(agent, scripts.into());
            self
        }

        fn critic(self, agent: usize, scripts: Vec<Script>) -> Self {
            self.critic.lock().unwrap().insert(agent, scripts.into());
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn solver_prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| !r.role.is_critic())
                .map(|r| r.user.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Oracle for ScriptedOracle {
        async fn invoke(&self, request: &OracleRequest) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());

            let script = match request.role {
                OracleRole::Solver { agent, .. } => self
                    .solver
                    .lock()
                    .unwrap()
                    .get_mut(&agent.index())
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| reply("\\boxed{42}")),
                OracleRole::Critic { target } => self
                    .critic
                    .lock()
                    .unwrap()
                    .get_mut(&target.agent.index())
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| reply(GOOD_GRADE)),
            };

            match script {
                Script::Reply(text) => Ok(text),
                Script::Fail(e) => Err(e),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(OracleError::Unavailable("hung".to_string()))
                }
                Script::CancelAndHang(token) => {
                    token.cancel();
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(OracleError::Unavailable("hung".to_string()))
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ConversationEvent>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn problem() -> Problem {
        Problem::new("A farmer has 80 sheep and sells 7. How many remain?").unwrap()
    }

    fn input(config: DebateConfig) -> RunDebateInput {
        RunDebateInput::new(problem(), config)
    }

    fn assert_rounds_complete(outcome: &DebateOutcome, agents: usize) {
        for record in &outcome.export.rounds {
            assert_eq!(record.candidates().len(), agents);
            assert_eq!(record.scores().len(), agents);
        }
    }

    #[tokio::test]
    async fn test_full_debate_reaches_decision() {
        let oracle = Arc::new(
            ScriptedOracle::default()
                .solver(0, vec![reply("80 - 7 = 73 \\boxed{73}"), reply("\\boxed{73}")])
                .solver(1, vec![reply("80 - 7 - 12 \\boxed{61}"), reply("\\boxed{73}")])
                .solver(2, vec![reply("\\boxed{73}"), reply("\\boxed{73.0}")]),
        );
        let use_case = RunDebateUseCase::new(Arc::clone(&oracle));

        let outcome = use_case.execute(input(DebateConfig::default())).await.unwrap();

        assert_eq!(outcome.status, DebateStatus::Completed);
        assert_eq!(outcome.export.rounds.len(), 2);
        assert_rounds_complete(&outcome, 3);
        assert_eq!(outcome.decision().answer, Answer::from_literal("73"));
        assert_eq!(outcome.decision().method, ResolutionMethod::Majority);
        assert_eq!(outcome.decision().derivation_round, Some(2));
        // 2 rounds x (3 solver + 3 critic calls)
        assert_eq!(oracle.calls(), 12);
    }

    #[tokio::test]
    async fn test_timed_out_call_is_substituted() {
        let oracle = Arc::new(ScriptedOracle::default().solver(1, vec![Script::Hang]));
        let use_case = RunDebateUseCase::new(oracle);
        let config = DebateConfig::default().with_timeout(Duration::from_millis(50));

        let outcome = use_case.execute(input(config)).await.unwrap();

        assert_eq!(outcome.status, DebateStatus::Completed);
        assert_eq!(outcome.export.rounds.len(), 2);
        assert_rounds_complete(&outcome, 3);

        let failed = &outcome.export.rounds[0].candidates()[1];
        assert!(failed.is_failed());
        assert!(failed.raw_text.is_empty());
        assert_eq!(failed.answer, Answer::Unparsed);
        assert!(failed.failure.as_deref().unwrap_or("").contains("Timed out"));
        assert_eq!(outcome.decision().answer, Answer::from_literal("42"));
    }

    #[tokio::test]
    async fn test_critic_failure_yields_minimal_score() {
        let oracle = Arc::new(
            ScriptedOracle::default()
                .critic(0, vec![Script::Fail(OracleError::Unavailable("down".to_string()))])
                .critic(2, vec![reply("no numbers here")]),
        );
        let use_case = RunDebateUseCase::new(oracle);

        let outcome = use_case
            .execute(input(DebateConfig::default().with_round_count(1)))
            .await
            .unwrap();

        let scores = outcome.export.rounds[0].scores();
        assert!(scores[0].substituted);
        assert_eq!(scores[0].total(), 0.0);
        assert!(scores[0].rationale.contains("down"));
        assert!(!scores[1].substituted);
        assert!(scores[2].substituted);
    }

    #[tokio::test]
    async fn test_configuration_error_aborts_before_any_call() {
        let oracle = Arc::new(ScriptedOracle::default());
        let use_case = RunDebateUseCase::new(Arc::clone(&oracle));
        let config = DebateConfig::default().with_strategies(vec![StrategyTag::Direct]);

        let err = use_case.execute(input(config)).await.unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancellation_keeps_completed_rounds() {
        let token = CancellationToken::new();
        let oracle = Arc::new(ScriptedOracle::default().solver(
            0,
            vec![reply("\\boxed{9}"), Script::CancelAndHang(token.clone())],
        ));
        let use_case = RunDebateUseCase::new(oracle).with_cancellation(token);

        let outcome = use_case
            .execute(input(DebateConfig::default().with_round_count(3)))
            .await
            .unwrap();

        assert_eq!(outcome.status, DebateStatus::Cancelled { round: 2 });
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.export.rounds.len(), 1);
        assert_eq!(outcome.decision().derivation_round, Some(1));
        assert!(outcome.export.to_transcript().is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_is_no_consensus() {
        let token = CancellationToken::new();
        token.cancel();
        let use_case =
            RunDebateUseCase::new(Arc::new(ScriptedOracle::default())).with_cancellation(token);

        let outcome = use_case.execute(input(DebateConfig::default())).await.unwrap();

        assert_eq!(outcome.status, DebateStatus::Cancelled { round: 1 });
        assert!(outcome.export.rounds.is_empty());
        assert!(outcome.decision().is_no_consensus());
    }

    #[tokio::test]
    async fn test_revision_context_contains_prior_round() {
        let round_one = ["first \\boxed{73}", "second \\boxed{61}", "third \\boxed{74}"];
        let oracle = Arc::new(
            ScriptedOracle::default()
                .solver(0, vec![reply(round_one[0])])
                .solver(1, vec![reply(round_one[1])])
                .solver(2, vec![reply(round_one[2])])
                .critic(1, vec![reply(r#"{"logic": 3, "computation": 9, "rationale": "subtracted twice"}"#)]),
        );
        let use_case = RunDebateUseCase::new(Arc::clone(&oracle));

        use_case.execute(input(DebateConfig::default())).await.unwrap();

        let revisions: Vec<_> = oracle
            .solver_prompts()
            .into_iter()
            .filter(|p| p.contains("Your previous solution"))
            .collect();
        assert_eq!(revisions.len(), 3);
        for prompt in &revisions {
            for text in round_one {
                assert!(prompt.contains(text));
            }
            assert!(prompt.contains("subtracted twice"));
        }
    }

    #[tokio::test]
    async fn test_nothing_parsed_is_no_consensus() {
        let prose = || vec![reply("I believe it is 73."), reply("Still 73.")];
        let oracle = Arc::new(
            ScriptedOracle::default()
                .solver(0, prose())
                .solver(1, prose())
                .solver(2, prose()),
        );
        let use_case = RunDebateUseCase::new(oracle);

        let outcome = use_case.execute(input(DebateConfig::default())).await.unwrap();

        assert_eq!(outcome.status, DebateStatus::Completed);
        assert_eq!(outcome.decision().answer, Answer::Unparsed);
        assert_eq!(outcome.decision().method, ResolutionMethod::NoConsensus);
    }

    #[tokio::test]
    async fn test_conversation_events() {
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RunDebateUseCase::new(Arc::new(ScriptedOracle::default()))
            .with_conversation_logger(logger.clone());

        use_case.execute(input(DebateConfig::default())).await.unwrap();

        let events = logger.events.lock().unwrap();
        let count = |kind: DebateEventKind| events.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(DebateEventKind::DebateStarted), 1);
        assert_eq!(count(DebateEventKind::CandidateGenerated), 6);
        assert_eq!(count(DebateEventKind::CandidateScored), 6);
        assert_eq!(count(DebateEventKind::RoundClosed), 2);
        assert_eq!(count(DebateEventKind::DebateResolved), 1);

        for event in events.iter() {
            match event.kind {
                DebateEventKind::CandidateGenerated | DebateEventKind::CandidateScored => {
                    assert!(matches!(event.round, Some(1 | 2)));
                    assert!(event.agent.is_some_and(|a| a.index() < 3));
                }
                DebateEventKind::RoundClosed => {
                    assert!(event.round.is_some());
                    assert!(event.agent.is_none());
                }
                _ => assert_eq!((event.round, event.agent), (None, None)),
            }
        }
        assert!(events.iter().all(|e| e.details.get("round").is_none()));
    }
}
