//! Prompt domain
//!
//! Templates for the solver and critic requests of each round.

mod template;

pub use template::PromptTemplate;
