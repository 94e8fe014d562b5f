//! HTTP client for the remote text-completion service.
//!
//! The client is constructed once in `main` and handed to the code that needs
//! it; there is no process-wide singleton. Callers talk to the
//! [`CompletionBackend`] trait so the network dependency can be mocked in
//! tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Fixed sampling parameters for one completion path.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub stop: String,
}

impl SamplingParams {
    /// Low temperature, short answer: command translation must be literal.
    pub fn command_generation(api: &ApiConfig) -> Self {
        Self {
            max_tokens: api.command_max_tokens.unwrap_or(150),
            temperature: api.command_temperature.unwrap_or(0.0),
            stop: "\n".to_string(),
        }
    }

    /// Moderate temperature for commit-message wording.
    pub fn commit_message(api: &ApiConfig) -> Self {
        Self {
            max_tokens: api.message_max_tokens.unwrap_or(60),
            temperature: api.message_temperature.unwrap_or(0.3),
            stop: "\n".to_string(),
        }
    }
}

/// Service that resolves a prompt to completion text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the trimmed text of the first choice.
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String>;
}

/// Client for an OpenAI-compatible completions endpoint.
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Build a client from the environment credential plus config overrides.
    pub fn from_env(api: &ApiConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .with_context(|| format!("{API_KEY_ENV} is not set"))?;

        Ok(Self::new(
            api_key,
            api.base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_COMPLETIONS_URL.to_string()),
            api.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        ))
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop: std::slice::from_ref(&params.stop),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach completion service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Completion service returned {status}: {}", body.trim());
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to decode completion response")?;

        completion
            .choices
            .first()
            .map(|choice| choice.text.trim().to_string())
            .context("Completion response contained no choices")
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stop: &'a [String],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}
