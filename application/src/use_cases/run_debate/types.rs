//! Type definitions for the RunDebate use case.

use crate::config::DebateConfig;
use debate_domain::{DomainError, FinalDecision, Problem, TranscriptExport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a debate
///
/// Oracle failures never show up here: they are substituted inside the
/// transcript.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(DomainError),

    #[error("Transcript invariant violated: {0}")]
    Transcript(DomainError),
}

impl RunDebateError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, RunDebateError::InvalidConfig(_))
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub problem: Problem,
    pub config: DebateConfig,
}

impl RunDebateInput {
    pub fn new(problem: Problem, config: DebateConfig) -> Self {
        Self { problem, config }
    }
}

/// How the debate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DebateStatus {
    /// Every configured round closed
    Completed,
    /// Cancelled while `round` was in flight; that round was discarded
    Cancelled { round: usize },
}

/// Output from the RunDebate use case
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    pub export: TranscriptExport,
    pub status: DebateStatus,
}

impl DebateOutcome {
    pub fn decision(&self) -> &FinalDecision {
        &self.export.decision
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, DebateStatus::Cancelled { .. })
    }
}
