//! Debate parameters: round controller control.
//!
//! Validation happens once, before any round starts. A configuration error is
//! the only kind of error that aborts a debate.

use debate_domain::debate::{RUBRIC_MAX, RUBRIC_MIN};
use debate_domain::{AgentId, DomainError, ResolverSettings, StrategyTag};
use std::time::Duration;

/// Debate control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateConfig {
    /// Number of solver slots in the pool
    pub agent_count: usize,
    /// Fixed number of generate + score rounds
    pub round_count: usize,
    /// Strategy per slot; must have exactly `agent_count` entries
    pub strategy_assignment: Vec<StrategyTag>,
    /// Timeout for every single oracle call
    pub per_call_timeout: Duration,
    /// Resolution policy and its thresholds
    pub resolver: ResolverSettings,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            agent_count: 3,
            round_count: 2,
            strategy_assignment: StrategyTag::default_assignment(3),
            per_call_timeout: Duration::from_secs(60),
            resolver: ResolverSettings::default(),
        }
    }
}

impl DebateConfig {
    // ==================== Builder Methods ====================

    /// Set the pool size, resetting the strategy assignment to the default rotation
    pub fn with_agent_count(mut self, count: usize) -> Self {
        self.agent_count = count;
        self.strategy_assignment = StrategyTag::default_assignment(count);
        self
    }

    pub fn with_round_count(mut self, count: usize) -> Self {
        self.round_count = count;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<StrategyTag>) -> Self {
        self.strategy_assignment = strategies;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverSettings) -> Self {
        self.resolver = resolver;
        self
    }

    /// Strategy bound to a slot
    pub fn strategy_for(&self, agent: AgentId) -> Option<StrategyTag> {
        self.strategy_assignment.get(agent.index()).copied()
    }

    /// Check every parameter before the first round.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.agent_count == 0 {
            return Err(DomainError::NoAgents);
        }
        if self.round_count == 0 {
            return Err(DomainError::NoRounds);
        }
        if self.strategy_assignment.len() != self.agent_count {
            return Err(DomainError::StrategyCountMismatch {
                expected: self.agent_count,
                actual: self.strategy_assignment.len(),
            });
        }
        if self.per_call_timeout.is_zero() {
            return Err(DomainError::ZeroTimeout);
        }
        check_threshold("resolver.vote_threshold", self.resolver.vote_threshold)?;
        check_threshold("resolver.weighted_threshold", self.resolver.weighted_threshold)?;
        if !self.resolver.weighted_alpha.is_finite() {
            return Err(DomainError::InvalidConfig {
                field: "resolver.weighted_alpha".to_string(),
                message: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}

fn check_threshold(field: &str, value: f64) -> Result<(), DomainError> {
    if !(RUBRIC_MIN..=RUBRIC_MAX).contains(&value) {
        return Err(DomainError::InvalidConfig {
            field: field.to_string(),
            message: format!("{} is outside [{}, {}]", value, RUBRIC_MIN, RUBRIC_MAX),
        });
    }
    Ok(())
}
