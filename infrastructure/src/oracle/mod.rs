//! Oracle adapters
//!
//! Implementations of the [`Oracle`](debate_application::Oracle) port.

mod openai;

pub use openai::{DEFAULT_BASE_URL, OpenAiOracle};
