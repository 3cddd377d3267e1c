use crate::api_types::Completion;
use anyhow::Result;
use async_trait::async_trait;
use humanity_core::config::LlmConfig;
use humanity_core::Turn;

/// Sampling parameters for one completion.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub max_tokens: u32,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl From<&LlmConfig> for CompletionParams {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_tokens: config.max_tokens.max(1),
            temperature: config.temperature.clamp(0.0, 2.0),
        }
    }
}

/// An opaque text-completion backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete `messages` (oldest first) under the `system` instruction.
    async fn complete(
        &self,
        system: &str,
        messages: Vec<Turn>,
        params: CompletionParams,
    ) -> Result<Completion>;
}
