//! Application layer for math-debate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DebateConfig;
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationLogger, DebateEventKind, NoConversationLogger,
    },
    oracle::{Oracle, OracleError, OracleRequest, OracleRole},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::replay_debate::{ReplayDebateError, ReplayDebateUseCase, ReplayOutcome};
pub use use_cases::run_debate::{
    AgentPool, AgentSlot, CriticAdapter, DebateOutcome, DebateStatus, RunDebateError,
    RunDebateInput, RunDebateUseCase,
};
