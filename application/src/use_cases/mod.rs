//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod replay_debate;
pub mod run_debate;
