//! Oracle port
//!
//! The oracle is the only seam to the reasoning agents and the critic:
//! given a prompt, it returns free-form text. Everything it says is opaque to
//! the engine apart from the answer marker and the rubric numbers.

use async_trait::async_trait;
use debate_domain::{AgentId, CandidateId, StrategyTag};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during an oracle call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed oracle response: {0}")]
    Malformed(String),

    #[error("Oracle returned an empty response")]
    EmptyResponse,

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
}

impl OracleError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, OracleError::Timeout(_))
    }
}

/// Who the oracle is asked to act as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleRole {
    /// Produce a candidate solution for one agent slot
    Solver { agent: AgentId, strategy: StrategyTag },
    /// Grade one candidate
    Critic { target: CandidateId },
}

impl OracleRole {
    pub fn is_critic(&self) -> bool {
        matches!(self, OracleRole::Critic { .. })
    }
}

impl std::fmt::Display for OracleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleRole::Solver { agent, strategy } => write!(f, "solver {} ({})", agent, strategy),
            OracleRole::Critic { target } => write!(f, "critic of {}", target),
        }
    }
}

/// A single prompt for the oracle
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub role: OracleRole,
    pub system: String,
    pub user: String,
}

impl OracleRequest {
    pub fn new(role: OracleRole, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            role,
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Text-producing oracle
///
/// This port defines how the application layer reaches the reasoning agents.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one request and return the raw response text
    async fn invoke(&self, request: &OracleRequest) -> Result<String, OracleError>;
}
