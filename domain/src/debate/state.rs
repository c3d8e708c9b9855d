//! Round controller state machine
//!
//! ```text
//! Init → Generating(1) → Scoring(1) → Generating(2) → … → Scoring(R) → Resolving → Terminal
//! ```
//!
//! The number of rounds is fixed up front; there is no early exit from the
//! generate/score cycle.

use serde::{Deserialize, Serialize};

/// Phase of a single round, used for progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebatePhase {
    Generating,
    Scoring,
    Resolving,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Generating => "Generating",
            DebatePhase::Scoring => "Scoring",
            DebatePhase::Resolving => "Resolving",
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateState {
    Init,
    Generating(usize),
    Scoring(usize),
    Resolving,
    Terminal,
}

impl DebateState {
    /// Advance to the next state for a debate of `round_count` rounds.
    ///
    /// `Terminal` is absorbing.
    pub fn next(self, round_count: usize) -> DebateState {
        match self {
            DebateState::Init if round_count == 0 => DebateState::Resolving,
            DebateState::Init => DebateState::Generating(1),
            DebateState::Generating(r) => DebateState::Scoring(r),
            DebateState::Scoring(r) if r < round_count => DebateState::Generating(r + 1),
            DebateState::Scoring(_) => DebateState::Resolving,
            DebateState::Resolving | DebateState::Terminal => DebateState::Terminal,
        }
    }

    /// The round this state belongs to, if any
    pub fn round(&self) -> Option<usize> {
        match self {
            DebateState::Generating(r) | DebateState::Scoring(r) => Some(*r),
            _ => None,
        }
    }

    pub fn phase(&self) -> Option<DebatePhase> {
        match self {
            DebateState::Generating(_) => Some(DebatePhase::Generating),
            DebateState::Scoring(_) => Some(DebatePhase::Scoring),
            DebateState::Resolving => Some(DebatePhase::Resolving),
            DebateState::Init | DebateState::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateState::Terminal)
    }
}

impl std::fmt::Display for DebateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebateState::Init => write!(f, "Init"),
            DebateState::Generating(r) => write!(f, "GeneratingRound({})", r),
            DebateState::Scoring(r) => write!(f, "ScoringRound({})", r),
            DebateState::Resolving => write!(f, "Resolving"),
            DebateState::Terminal => write!(f, "Terminal"),
        }
    }
}
