//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod oracle;
mod output;
mod resolver;

pub use debate::FileDebateConfig;
pub use oracle::FileOracleConfig;
pub use output::FileOutputConfig;
pub use resolver::FileResolverConfig;

use debate_application::DebateConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-fatal configuration problems, reported as warnings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: unknown value '{value}', falling back to '{fallback}'")]
    InvalidEnumValue {
        field: String,
        value: String,
        fallback: String,
    },

    #[error("{field} cannot be empty")]
    EmptyValue { field: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Pool and round settings
    pub debate: FileDebateConfig,
    /// Resolution policy
    pub resolver: FileResolverConfig,
    /// Oracle endpoint and models
    pub oracle: FileOracleConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        issues.extend(self.debate.parse_strategies().1);
        issues.extend(self.resolver.parse_policy().1);
        issues.extend(self.output.parse_format().1);

        if self.oracle.solver_model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyValue {
                field: "oracle.solver_model".to_string(),
            });
        }
        if self.oracle.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyValue {
                field: "oracle.base_url".to_string(),
            });
        }

        issues
    }

    /// Build the debate parameters.
    ///
    /// Range checks happen later in [`DebateConfig::validate`].
    pub fn to_debate_config(&self) -> DebateConfig {
        let (strategies, _) = self.debate.parse_strategies();
        let (resolver, _) = self.resolver.to_settings();
        DebateConfig {
            agent_count: self.debate.agent_count,
            round_count: self.debate.round_count,
            strategy_assignment: strategies,
            per_call_timeout: self.debate.timeout(),
            resolver,
        }
    }
}
