use crate::api_types::{ChatMessage, ChatRequest, ChatResponse, Completion};
use crate::llm::{CompletionParams, LlmClient};
use crate::retry::{with_retry, RetryPolicy};
use anyhow::{Context, Result};
use humanity_core::config::LlmConfig;
use humanity_core::Turn;
use reqwest::Client;
use std::time::Duration;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("OpenAI provider requires an API key (OPENAI_API_KEY)")?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs.max(1)))
                .build()
                .context("Failed to build HTTP client")?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        messages: Vec<Turn>,
        params: CompletionParams,
    ) -> Result<Completion> {
        // System prompt goes first as a "system" role message.
        let mut chat = Vec::with_capacity(messages.len() + 1);
        chat.push(ChatMessage {
            role: "system",
            content: system,
        });
        chat.extend(messages.iter().map(ChatMessage::from));

        let payload = ChatRequest {
            model: &self.model,
            messages: chat,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("OpenAI request: {} messages to {}", messages.len() + 1, url);

        let response = with_retry(&self.retry, "OpenAI", || {
            let request = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&payload);
            async move {
                request
                    .send()
                    .await
                    .context("Failed to send request to OpenAI")
            }
        })
        .await?;

        let body: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .context("OpenAI response contained no choices")?;

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }
}
