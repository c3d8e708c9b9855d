//! Oracle configuration from TOML (`[oracle]` section)

use serde::{Deserialize, Serialize};

/// Raw oracle configuration from TOML
///
/// # Example
///
/// ```toml
/// [oracle]
/// base_url = "https://api.openai.com/v1"
/// solver_model = "gpt-4o-mini"
/// critic_model = "gpt-4o"          # defaults to solver_model
/// api_key_env = "OPENAI_API_KEY"
/// temperature = 0.7
/// max_tokens = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    pub base_url: String,
    pub solver_model: String,
    pub critic_model: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            solver_model: "gpt-4o-mini".to_string(),
            critic_model: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl FileOracleConfig {
    pub fn critic_model(&self) -> &str {
        self.critic_model.as_deref().unwrap_or(&self.solver_model)
    }
}
