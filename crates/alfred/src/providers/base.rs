use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::content::{ContentBlock, NormalizedContent};

/// Token counts as reported by the model host, when it reports them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderUsage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl ProviderUsage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for model hosts (OpenAI, Ollama)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a reply to a single user turn under the given system prompt
    async fn complete(
        &self,
        system: &str,
        content: &NormalizedContent,
    ) -> Result<(Vec<ContentBlock>, ProviderUsage)>;
}
