//! Debate configuration from TOML (`[debate]` section)

use super::ConfigValidationError;
use debate_domain::StrategyTag;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw debate configuration from TOML
///
/// # Example
///
/// ```toml
/// [debate]
/// agent_count = 3
/// round_count = 2
/// strategies = ["direct", "programmatic", "contrastive"]   # one per agent
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub agent_count: usize,
    pub round_count: usize,
    /// Empty means the default rotation
    pub strategies: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            agent_count: 3,
            round_count: 2,
            strategies: Vec::new(),
            timeout_secs: 60,
        }
    }
}

impl FileDebateConfig {
    /// Parse the strategy list, returning warnings for unknown names.
    ///
    /// Unknown entries fall back to `direct` so the list keeps its length;
    /// a length mismatch is left for the debate validation to reject.
    pub fn parse_strategies(&self) -> (Vec<StrategyTag>, Vec<ConfigValidationError>) {
        if self.strategies.is_empty() {
            return (StrategyTag::default_assignment(self.agent_count), vec![]);
        }

        let mut issues = Vec::new();
        let tags = self
            .strategies
            .iter()
            .enumerate()
            .map(|(i, name)| {
                name.parse::<StrategyTag>().unwrap_or_else(|_| {
                    issues.push(ConfigValidationError::InvalidEnumValue {
                        field: format!("debate.strategies[{}]", i),
                        value: name.clone(),
                        fallback: StrategyTag::Direct.to_string(),
                    });
                    StrategyTag::Direct
                })
            })
            .collect();
        (tags, issues)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
