use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::base::{build_endpoint, extract_api_key, mask_api_key, parse_retry_after};
use crate::config::{NetworkConfig, ProviderConfig};
use crate::error::{GcaError, Result};
use crate::llm::CompletionProvider;

/// Groq API base URL. Groq speaks the OpenAI chat-completions wire format
/// under an `/openai` prefix.
pub const DEFAULT_GROQ_BASE: &str = "https://api.groq.com/openai";

/// Chat-completions endpoint suffix.
pub const CHAT_COMPLETIONS_SUFFIX: &str = "/v1/chat/completions";

/// Environment variable holding the API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TEMPERATURE: f32 = 0.5;
const DEFAULT_MAX_TOKENS: u32 = 300;

/// Maximum response-body length quoted in error messages.
const ERROR_PREVIEW_LENGTH: usize = 500;

/// Groq chat-completions provider.
///
/// One request per generate action, no retries: transport and API failures
/// are mapped onto the error taxonomy and surfaced to the session.
pub struct GroqProvider {
    client: Client,
    name: String,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<MessagePayload>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct MessagePayload {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl GroqProvider {
    pub fn new(
        config: &ProviderConfig,
        provider_name: &str,
        network_config: &NetworkConfig,
    ) -> Result<Self> {
        let api_key = extract_api_key(config, GROQ_API_KEY_ENV, provider_name)?;
        let endpoint = build_endpoint(config, DEFAULT_GROQ_BASE, CHAT_COMPLETIONS_SUFFIX);
        let model = if config.model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            config.model.clone()
        };

        tracing::debug!(
            "{} provider: endpoint={}, model={}, key={}",
            provider_name,
            endpoint,
            model,
            mask_api_key(&api_key)
        );

        Ok(Self {
            client: super::create_http_client(network_config)?,
            name: provider_name.to_string(),
            api_key,
            endpoint,
            model,
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        })
    }
}

/// Truncate a response body for inclusion in an error message, respecting
/// char boundaries.
fn truncate_for_preview(s: &str) -> String {
    if s.len() <= ERROR_PREVIEW_LENGTH {
        return s.trim().to_string();
    }
    let boundary = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= ERROR_PREVIEW_LENGTH)
        .last()
        .unwrap_or(0);
    format!("{}...", s[..boundary].trim())
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn send_prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                MessagePayload {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                MessagePayload {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            "{} API request: model={}, temperature={}, max_tokens={}",
            self.name,
            self.model,
            self.temperature,
            self.max_tokens
        );

        // Transport failures map to Network via the From impl.
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} API response status: {}", self.name, status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(GcaError::Auth(format!(
                "{} rejected the API key ({}): {}",
                self.name,
                status,
                truncate_for_preview(&body)
            )));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            let body = response.text().await.unwrap_or_default();
            return Err(GcaError::RateLimited {
                retry_after,
                message: truncate_for_preview(&body),
            });
        }

        let response_text = response.text().await?;
        tracing::debug!("{} API response body: {}", self.name, response_text);

        if !status.is_success() {
            return Err(GcaError::Api {
                status: status.as_u16(),
                message: format!("{}: {}", self.name, truncate_for_preview(&response_text)),
            });
        }

        let response_body: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            GcaError::Api {
                status: status.as_u16(),
                message: format!(
                    "failed to parse {} response: {}. Raw response: {}",
                    self.name,
                    e,
                    truncate_for_preview(&response_text)
                ),
            }
        })?;

        let text = response_body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GcaError::Auth("API key is empty".to_string()));
        }
        Ok(())
    }
}
