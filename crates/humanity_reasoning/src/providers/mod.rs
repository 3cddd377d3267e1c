pub mod mock;
pub mod openai;

pub use mock::MockProvider;
pub use openai::OpenAiClient;

use crate::llm::LlmClient;
use anyhow::Result;
use humanity_core::config::LlmConfig;

/// Build the configured backend, or `None` when the cycle should run offline.
pub fn build_backend(config: &LlmConfig) -> Result<Option<Box<dyn LlmClient>>> {
    if !config.backend_enabled() {
        tracing::info!(
            "No generation backend configured (provider '{}'), using canned replies",
            config.provider
        );
        return Ok(None);
    }
    let backend: Box<dyn LlmClient> = match config.provider.as_str() {
        "mock" => Box::new(MockProvider::new(&config.model)),
        _ => Box::new(OpenAiClient::new(config)?),
    };
    tracing::info!(
        "Generation backend: {} ({})",
        config.provider,
        config.model
    );
    Ok(Some(backend))
}
