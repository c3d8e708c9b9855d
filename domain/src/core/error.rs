//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only configuration problems abort a debate. Oracle failures, ambiguous
/// answers and out-of-range rubric values are absorbed into the transcript
/// and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("At least one agent is required")]
    NoAgents,

    #[error("At least one round is required")]
    NoRounds,

    #[error("Strategy assignment has {actual} entries but {expected} agents are configured")]
    StrategyCountMismatch { expected: usize, actual: usize },

    #[error("Per-call timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid configuration value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Round {round} is incomplete: {message}")]
    IncompleteRound { round: usize, message: String },

    #[error("Round {actual} cannot follow round {expected_after} in the transcript")]
    RoundOutOfOrder { expected_after: usize, actual: usize },
}

impl DomainError {
    /// Whether this error belongs to the configuration class (fatal at startup)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::NoAgents
                | DomainError::NoRounds
                | DomainError::StrategyCountMismatch { .. }
                | DomainError::ZeroTimeout
                | DomainError::InvalidConfig { .. }
        )
    }
}
