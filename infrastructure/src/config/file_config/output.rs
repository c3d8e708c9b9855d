//! Output configuration from TOML (`[output]` section)

use super::ConfigValidationError;
use debate_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
///
/// # Example
///
/// ```toml
/// [output]
/// format = "markdown"   # full, decision, markdown or json
/// color = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Kept as a string so a typo is a warning, not a load failure
    pub format: Option<String>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parse the configured format; `None` when unset
    pub fn parse_format(&self) -> (Option<OutputFormat>, Vec<ConfigValidationError>) {
        let Some(raw) = self.format.as_deref() else {
            return (None, vec![]);
        };
        match raw.parse::<OutputFormat>() {
            Ok(format) => (Some(format), vec![]),
            Err(_) => (
                None,
                vec![ConfigValidationError::InvalidEnumValue {
                    field: "output.format".to_string(),
                    value: raw.to_string(),
                    fallback: "decision".to_string(),
                }],
            ),
        }
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.parse_format().0
    }
}
