//! Resolver configuration from TOML (`[resolver]` section)

use super::ConfigValidationError;
use debate_domain::{MajorityResolver, ResolverKind, ResolverSettings, WeightedResolver};
use serde::{Deserialize, Serialize};

/// Raw resolver configuration from TOML
///
/// # Example
///
/// ```toml
/// [resolver]
/// policy = "majority"          # "majority" or "weighted"
/// vote_threshold = 7.5         # majority: minimum mean score for a vote to count
/// weighted_alpha = 1.0         # weighted: exp(alpha * mean / 10)
/// weighted_threshold = 4.0     # weighted: minimum mean score to carry weight
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResolverConfig {
    pub policy: String,
    pub vote_threshold: f64,
    pub weighted_alpha: f64,
    pub weighted_threshold: f64,
}

impl Default for FileResolverConfig {
    fn default() -> Self {
        Self {
            policy: "majority".to_string(),
            vote_threshold: MajorityResolver::DEFAULT_VOTE_THRESHOLD,
            weighted_alpha: WeightedResolver::DEFAULT_ALPHA,
            weighted_threshold: WeightedResolver::DEFAULT_THRESHOLD,
        }
    }
}

impl FileResolverConfig {
    /// Parse policy string into ResolverKind, returning warnings on failure.
    pub fn parse_policy(&self) -> (ResolverKind, Vec<ConfigValidationError>) {
        match self.policy.parse::<ResolverKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                ResolverKind::default(),
                vec![ConfigValidationError::InvalidEnumValue {
                    field: "resolver.policy".to_string(),
                    value: self.policy.clone(),
                    fallback: ResolverKind::default().to_string(),
                }],
            ),
        }
    }

    pub fn to_settings(&self) -> (ResolverSettings, Vec<ConfigValidationError>) {
        let (kind, issues) = self.parse_policy();
        let settings = ResolverSettings {
            kind,
            vote_threshold: self.vote_threshold,
            weighted_alpha: self.weighted_alpha,
            weighted_threshold: self.weighted_threshold,
        };
        (settings, issues)
    }
}
