use anyhow::Result;
use async_trait::async_trait;

use crate::models::chat::ModelCard;
use crate::models::content::{ContentBlock, NormalizedContent};
use crate::providers::base::Provider;

/// The single model id this service answers to
pub const ALFRED_MODEL_ID: &str = "alfred-butler";
pub const ALFRED_OWNER: &str = "strands-agents";

const SYSTEM_PROMPT: &str = include_str!("prompts/alfred.md");

/// Returned when the model replies without any text
pub const FALLBACK_REPLY: &str =
    "I apologise, but I seem to be having difficulty formulating a response at the moment.";

/// Anything that can answer one normalized user turn with text
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn invoke(&self, content: NormalizedContent) -> Result<String>;
}

/// Alfred: a fixed persona prompt in front of a model provider
///
/// The agent keeps no conversation state; every call is a fresh exchange of
/// system prompt plus a single user turn.
pub struct Agent {
    provider: Box<dyn Provider>,
    system_prompt: String,
}

impl Agent {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// How the agent is listed under `/v1/models`
    pub fn model_card() -> ModelCard {
        ModelCard::new(ALFRED_MODEL_ID, ALFRED_OWNER)
    }
}

#[async_trait]
impl AgentRuntime for Agent {
    async fn invoke(&self, content: NormalizedContent) -> Result<String> {
        let (reply, usage) = self.provider.complete(&self.system_prompt, &content).await?;
        tracing::debug!(?usage, "provider reported usage");

        let text = reply
            .first()
            .and_then(ContentBlock::as_text)
            .unwrap_or(FALLBACK_REPLY);
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ImageFormat;
    use crate::providers::mock::MockProvider;

    #[tokio::test]
    async fn test_invoke_returns_first_text_block() -> Result<()> {
        let provider = MockProvider::new(vec![vec![
            ContentBlock::text("Good evening, sir."),
            ContentBlock::text("Shall I prepare the car?"),
        ]]);
        let requests = provider.requests.clone();
        let agent = Agent::new(Box::new(provider));

        let reply = agent.invoke(NormalizedContent::text("Hello Alfred")).await?;

        assert_eq!(reply, "Good evening, sir.");
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("Alfred Pennyworth"));
        assert_eq!(requests[0].1, NormalizedContent::text("Hello Alfred"));
        Ok(())
    }

    #[tokio::test]
    async fn test_invoke_passes_blocks_through() -> Result<()> {
        let provider = MockProvider::new(vec![vec![ContentBlock::text("A fine cat.")]]);
        let requests = provider.requests.clone();
        let agent = Agent::new(Box::new(provider)).with_system_prompt("Be brief.");
        let content = NormalizedContent::Blocks(vec![
            ContentBlock::text("What is this?"),
            ContentBlock::image(ImageFormat::Png, vec![1, 2, 3]),
        ]);

        agent.invoke(content.clone()).await?;

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].0, "Be brief.");
        assert_eq!(requests[0].1, content);
        Ok(())
    }

    #[tokio::test]
    async fn test_invoke_without_text_falls_back() -> Result<()> {
        let agent = Agent::new(Box::new(MockProvider::new(vec![vec![]])));
        let reply = agent.invoke(NormalizedContent::text("Hello")).await?;
        assert_eq!(reply, FALLBACK_REPLY);
        Ok(())
    }

    #[tokio::test]
    async fn test_invoke_propagates_provider_failure() {
        let agent = Agent::new(Box::new(MockProvider::failing("model unavailable")));
        let err = agent
            .invoke(NormalizedContent::text("Hello"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn test_model_card() {
        let card = Agent::model_card();
        assert_eq!(card.id, "alfred-butler");
        assert_eq!(card.object, "model");
        assert_eq!(card.owned_by, "strands-agents");
    }
}
