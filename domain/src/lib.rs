//! Domain layer for math-debate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several solver agents propose a solution to the same arithmetic word
//! problem. A critic grades every proposal on two axes (logic, computation),
//! and the agents revise over a fixed number of rounds while seeing each
//! other's proposals and grades.
//!
//! ## Resolution
//!
//! A pluggable [`ResolutionPolicy`] turns the finished [`Transcript`] into a
//! single [`FinalDecision`]. Resolution is pure: a saved transcript always
//! resolves to the same decision.

pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod resolver;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, problem::Problem};
pub use debate::{
    AgentId, Answer, AnswerTally, AnswerValue, Candidate, CandidateId, DebateContext, DebatePhase,
    DebateState, Extraction, FinalDecision, NormalizedValue, ResolutionMethod, RoundRecord,
    RubricReading, Score, StrategyTag, Transcript, TranscriptExport, answers_disagree,
    extract_answer, parse_rubric, scan_answer,
};
pub use prompt::PromptTemplate;
pub use resolver::{
    MajorityResolver, ResolutionPolicy, ResolverKind, ResolverSettings, WeightedResolver,
};
