//! OpenAI-compatible chat completions oracle
//!
//! Talks to any endpoint that speaks the `/chat/completions` protocol
//! (OpenAI, vLLM, Ollama, llama.cpp server, ...). Solver and critic calls may
//! use different models.
//!
//! # Example
//!
//! ```rust,ignore
//! let oracle = OpenAiOracle::from_env("OPENAI_API_KEY", "gpt-4o-mini")?
//!     .with_critic_model("gpt-4o")
//!     .with_temperature(0.7);
//! ```

use crate::config::FileOracleConfig;
use async_trait::async_trait;
use debate_application::ports::oracle::{Oracle, OracleError, OracleRequest};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Oracle backed by an OpenAI-compatible HTTP API
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    base_url: String,
    solver_model: String,
    critic_model: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    /// Transport-level ceiling; the debate applies its own per-call timeout
    http_timeout: Duration,
    client: Client,
}

impl OpenAiOracle {
    /// Create an oracle, reading the API key from the named environment variable.
    ///
    /// A missing variable is allowed for local servers that need no key.
    pub fn from_env(api_key_env: &str, model: &str) -> Result<Self, OracleError> {
        let api_key = std::env::var(api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            debug!("{} is not set; sending requests without Authorization", api_key_env);
        }
        Self::build(model, api_key.as_deref())
    }

    /// Create an oracle with an explicit API key
    pub fn with_api_key(model: &str, api_key: &str) -> Result<Self, OracleError> {
        Self::build(model, Some(api_key))
    }

    /// Create an oracle from the `[oracle]` config section
    pub fn from_config(config: &FileOracleConfig) -> Result<Self, OracleError> {
        let mut oracle = Self::from_env(&config.api_key_env, &config.solver_model)?
            .with_base_url(&config.base_url)
            .with_critic_model(config.critic_model());
        oracle.temperature = config.temperature;
        oracle.max_tokens = config.max_tokens;
        Ok(oracle)
    }

    fn build(model: &str, api_key: Option<&str>) -> Result<Self, OracleError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| OracleError::Unavailable(format!("Invalid API key format: {}", e)))?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| OracleError::Unavailable(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            solver_model: model.to_string(),
            critic_model: model.to_string(),
            temperature: None,
            max_tokens: None,
            http_timeout: Duration::from_secs(300),
            client,
        })
    }

    /// Set custom base URL (for proxies or compatible APIs)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_critic_model(mut self, model: &str) -> Self {
        self.critic_model = model.to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Model used for a request
    pub fn model_for(&self, request: &OracleRequest) -> &str {
        if request.role.is_critic() {
            &self.critic_model
        } else {
            &self.solver_model
        }
    }

    fn chat_request<'a>(&'a self, request: &'a OracleRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if !request.system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &request.system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.user,
        });

        ChatRequest {
            model: self.model_for(request),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// First non-empty choice content
fn extract_content(body: ChatResponse) -> Result<String, OracleError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(OracleError::EmptyResponse)
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn invoke(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.chat_request(request);

        debug!("POST {} as {} with model {}", url, request.role, body.model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.http_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(self.http_timeout)
                } else if e.is_connect() {
                    OracleError::Unavailable(format!("Connection failed: {}", e))
                } else {
                    OracleError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(OracleError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(format!("Failed to parse response: {}", e)))?;

        extract_content(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_application::ports::oracle::OracleRole;
    use debate_domain::{AgentId, CandidateId, StrategyTag};

    fn solver_request() -> OracleRequest {
        OracleRequest::new(
            OracleRole::Solver {
                agent: AgentId(0),
                strategy: StrategyTag::Direct,
            },
            "You solve math problems.",
            "What is 2 + 2?",
        )
    }

    fn critic_request() -> OracleRequest {
        OracleRequest::new(
            OracleRole::Critic {
                target: CandidateId::new(1, AgentId(0)),
            },
            "",
            "Grade this.",
        )
    }

    #[test]
    fn test_oracle_with_api_key() {
        let oracle = OpenAiOracle::with_api_key("gpt-4o-mini", "test-key").unwrap();
        assert_eq!(oracle.base_url, DEFAULT_BASE_URL);
        assert_eq!(oracle.solver_model, "gpt-4o-mini");
        assert_eq!(oracle.critic_model, "gpt-4o-mini");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let oracle = OpenAiOracle::with_api_key("m", "k")
            .unwrap()
            .with_base_url("http://localhost:11434/v1/");
        assert_eq!(oracle.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let err = OpenAiOracle::with_api_key("m", "bad\nkey").unwrap_err();
        assert!(matches!(err, OracleError::Unavailable(_)));
    }

    #[test]
    fn test_model_selected_by_role() {
        let oracle = OpenAiOracle::with_api_key("small", "k")
            .unwrap()
            .with_critic_model("large");
        assert_eq!(oracle.model_for(&solver_request()), "small");
        assert_eq!(oracle.model_for(&critic_request()), "large");
    }

    #[test]
    fn test_from_config() {
        let config = FileOracleConfig {
            base_url: "http://127.0.0.1:8000/v1/".to_string(),
            critic_model: Some("judge".to_string()),
            temperature: Some(0.2),
            max_tokens: Some(512),
            api_key_env: "MATH_DEBATE_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        let oracle = OpenAiOracle::from_config(&config).unwrap();
        assert_eq!(oracle.base_url, "http://127.0.0.1:8000/v1");
        assert_eq!(oracle.critic_model, "judge");
        assert_eq!(oracle.temperature, Some(0.2));
        assert_eq!(oracle.max_tokens, Some(512));
    }

    #[test]
    fn test_request_serialization() {
        let oracle = OpenAiOracle::with_api_key("gpt-4o-mini", "k")
            .unwrap()
            .with_temperature(0.5);
        let request = solver_request();
        let json = serde_json::to_value(oracle.chat_request(&request)).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.5);
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "What is 2 + 2?");
    }

    #[test]
    fn test_empty_system_prompt_omitted() {
        let oracle = OpenAiOracle::with_api_key("m", "k").unwrap();
        let request = critic_request();
        let json = serde_json::to_value(oracle.chat_request(&request)).unwrap();
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn test_extract_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "\\boxed{4}"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "\\boxed{4}");
    }

    #[test]
    fn test_extract_content_empty() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(extract_content(body), Err(OracleError::EmptyResponse));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(extract_content(body), Err(OracleError::EmptyResponse));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "  "}}]}"#).unwrap();
        assert_eq!(extract_content(body), Err(OracleError::EmptyResponse));
    }
}
