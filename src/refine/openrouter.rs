//! OpenRouter chat completions refiner.
//!
//! One request per chunk; no retry policy here — a failed chunk fails the
//! whole batch and the caller falls back to the original segments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Result, SubfixError};
use crate::refine::prompt::ChunkPrompt;
use crate::refine::refiner::Refiner;

/// Refiner backed by the OpenRouter chat completions API.
pub struct OpenRouterRefiner {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenRouterRefiner {
    /// Creates a refiner for the given model with an explicit API key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: defaults::OPENROUTER_BASE_URL.to_string(),
            temperature: 0.0,
        }
    }

    /// Creates a refiner reading the API key from the environment.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(defaults::API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(SubfixError::MissingApiKey {
                env_var: defaults::API_KEY_ENV.to_string(),
            })?;
        Ok(Self::new(api_key, model))
    }

    /// Override the API base URL (e.g. for a compatible proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl Refiner for OpenRouterRefiner {
    async fn refine(&self, prompt: &ChunkPrompt) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubfixError::RefineRequest {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubfixError::RefineRequest {
                message: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| SubfixError::RefineReply {
                    message: e.to_string(),
                })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(SubfixError::RefineReply {
                message: "reply contained no choices".to_string(),
            })?;

        Ok(content)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}
