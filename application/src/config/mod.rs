//! Application-level configuration.
//!
//! [`DebateConfig`] controls how the round controller runs: pool size, round
//! count, strategy per slot, the per-call timeout and the resolution policy.

pub mod debate_config;

pub use debate_config::DebateConfig;
