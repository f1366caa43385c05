use std::sync::Arc;

use crate::agent::AgentRuntime;
use crate::errors::{ChatError, ChatResult};
use crate::fetcher::ImageFetcher;
use crate::models::chat::{ChatMessage, ChatRequest, ChatResponse};
use crate::normalizer::MessageNormalizer;
use crate::token_counter::estimate_usage;

/// Drives one chat completion from request to response envelope
///
/// Only the most recent user turn is sent to the agent. Earlier turns and
/// system messages are accepted for compatibility and counted in the usage
/// estimate, but never reach the model.
pub struct ChatService {
    agent: Arc<dyn AgentRuntime>,
    normalizer: MessageNormalizer,
}

impl ChatService {
    pub fn new(agent: Arc<dyn AgentRuntime>, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            agent,
            normalizer: MessageNormalizer::new(fetcher),
        }
    }

    pub async fn complete(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        let message = last_user_message(&request.messages)
            .ok_or_else(|| ChatError::ClientInput("No user message found".to_string()))?;

        let content = self.normalizer.normalize(message).await?;

        let reply = self.agent.invoke(content).await.map_err(|e| {
            tracing::error!("agent invocation failed: {:#}", e);
            ChatError::RuntimeInvocation(format!("{:#}", e))
        })?;

        let usage = estimate_usage(&request.messages, &reply);
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "completed chat request for model {}",
            request.model
        );

        Ok(ChatResponse::new(request.model.clone(), reply, usage))
    }
}

fn last_user_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    messages.iter().rev().find(|message| message.is_user())
}
