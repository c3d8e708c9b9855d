//! Solving strategies for agent slots
//!
//! A strategy only changes the framing sent to the oracle. The round
//! controller never branches on it, so new variants only need a framing in
//! [`PromptTemplate`](crate::prompt::PromptTemplate).

use serde::{Deserialize, Serialize};

/// Solving style bound to an agent slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    /// Step-by-step derivation
    Direct,
    /// Write a program first, then deduce the answer from it
    Programmatic,
    /// Describe plausible wrong approaches, then solve avoiding them
    Contrastive,
    /// Map every quantity to its semantic role before calculating
    DependencyMap,
}

impl StrategyTag {
    /// The default rotation used when no explicit assignment is given
    pub const ROTATION: [StrategyTag; 3] = [
        StrategyTag::Direct,
        StrategyTag::Programmatic,
        StrategyTag::Contrastive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::Direct => "direct",
            StrategyTag::Programmatic => "programmatic",
            StrategyTag::Contrastive => "contrastive",
            StrategyTag::DependencyMap => "dependency_map",
        }
    }

    /// Default assignment for `count` agents, cycling through [`Self::ROTATION`]
    pub fn default_assignment(count: usize) -> Vec<StrategyTag> {
        (0..count)
            .map(|i| Self::ROTATION[i % Self::ROTATION.len()])
            .collect()
    }
}

impl std::fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "direct" | "logician" => Ok(StrategyTag::Direct),
            "programmatic" | "program" | "code" | "programmer" => Ok(StrategyTag::Programmatic),
            "contrastive" | "skeptic" | "negative" => Ok(StrategyTag::Contrastive),
            "dependency" | "dependency_map" | "synthesizer" => Ok(StrategyTag::DependencyMap),
            other => Err(format!(
                "Unknown strategy: {}. Valid: direct, programmatic, contrastive, dependency_map",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("direct".parse::<StrategyTag>(), Ok(StrategyTag::Direct));
        assert_eq!("Code".parse::<StrategyTag>(), Ok(StrategyTag::Programmatic));
        assert_eq!("skeptic".parse::<StrategyTag>(), Ok(StrategyTag::Contrastive));
        assert_eq!(
            "dependency-map".parse::<StrategyTag>(),
            Ok(StrategyTag::DependencyMap)
        );
        assert!("poetic".parse::<StrategyTag>().is_err());
    }

    #[test]
    fn test_default_assignment_cycles() {
        assert_eq!(
            StrategyTag::default_assignment(4),
            vec![
                StrategyTag::Direct,
                StrategyTag::Programmatic,
                StrategyTag::Contrastive,
                StrategyTag::Direct,
            ]
        );
        assert!(StrategyTag::default_assignment(0).is_empty());
    }

    #[test]
    fn test_display_roundtrip() {
        for tag in [
            StrategyTag::Direct,
            StrategyTag::Programmatic,
            StrategyTag::Contrastive,
            StrategyTag::DependencyMap,
        ] {
            assert_eq!(tag.to_string().parse::<StrategyTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&StrategyTag::DependencyMap).unwrap();
        assert_eq!(json, "\"dependency_map\"");
    }
}
