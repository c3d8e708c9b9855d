//! Infrastructure layer for math-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading and
//! transcript persistence.

pub mod config;
pub mod logging;
pub mod oracle;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileOracleConfig,
    FileOutputConfig, FileResolverConfig,
};
pub use logging::JsonlConversationLogger;
pub use oracle::{DEFAULT_BASE_URL, OpenAiOracle};
pub use store::{TranscriptStore, TranscriptStoreError};
