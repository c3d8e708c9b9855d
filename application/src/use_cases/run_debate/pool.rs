//! Agent pool: fixed solver slots, one strategy each.

use crate::config::DebateConfig;
use crate::ports::oracle::{OracleError, OracleRequest, OracleRole};
use debate_domain::{AgentId, Candidate, DebateContext, Extraction, PromptTemplate, StrategyTag};

/// One solver slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSlot {
    pub id: AgentId,
    pub strategy: StrategyTag,
}

impl AgentSlot {
    /// Solver request for this slot in the given round context
    pub fn request(&self, context: &DebateContext) -> OracleRequest {
        OracleRequest::new(
            OracleRole::Solver {
                agent: self.id,
                strategy: self.strategy,
            },
            PromptTemplate::solver_system(self.strategy),
            PromptTemplate::solver_prompt(context, self.id),
        )
    }

    /// Turn an oracle result into this slot's candidate.
    ///
    /// A failed call yields the unparsed sentinel with empty text. The
    /// extraction outcome is returned for successful calls.
    pub fn candidate(
        &self,
        round: usize,
        result: Result<String, OracleError>,
    ) -> (Candidate, Option<Extraction>) {
        match result {
            Ok(text) => {
                let (candidate, extraction) =
                    Candidate::from_response(self.id, round, self.strategy, text);
                (candidate, Some(extraction))
            }
            Err(e) => (
                Candidate::failed(self.id, round, self.strategy, e.to_string()),
                None,
            ),
        }
    }
}

/// Fixed-size set of solver slots
#[derive(Debug, Clone)]
pub struct AgentPool {
    slots: Vec<AgentSlot>,
}

impl AgentPool {
    /// Build the pool from a validated configuration
    pub fn from_config(config: &DebateConfig) -> Self {
        let slots = config
            .strategy_assignment
            .iter()
            .take(config.agent_count)
            .enumerate()
            .map(|(i, strategy)| AgentSlot {
                id: AgentId(i),
                strategy: *strategy,
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[AgentSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
