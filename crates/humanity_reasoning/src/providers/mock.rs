//! Mock provider: deterministic replies for offline runs and tests.

use crate::api_types::Completion;
use crate::llm::{CompletionParams, LlmClient};
use anyhow::Result;
use humanity_core::{Role, Turn};

#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
}

impl MockProvider {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        messages: Vec<Turn>,
        _params: CompletionParams,
    ) -> Result<Completion> {
        let last = messages
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or("");
        Ok(Completion::from_text(format!("({}) Ты сказал: {}", self.model, last)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_last_user_turn() {
        let provider = MockProvider::new("test-model");
        let resp = provider
            .complete(
                "system",
                vec![
                    Turn::user("первое"),
                    Turn::assistant("ответ"),
                    Turn::user("второе"),
                ],
                CompletionParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.text, "(test-model) Ты сказал: второе");
    }

    #[tokio::test]
    async fn test_mock_without_messages() {
        let provider = MockProvider::new("m");
        let resp = provider
            .complete("system", vec![], CompletionParams::default())
            .await
            .unwrap();
        assert!(resp.text.starts_with("(m)"));
    }
}
