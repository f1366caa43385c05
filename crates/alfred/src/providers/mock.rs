use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::content::{ContentBlock, NormalizedContent};
use crate::providers::base::{Provider, ProviderUsage};

/// A mock provider that returns pre-configured replies and remembers what it was sent
pub struct MockProvider {
    responses: Mutex<Vec<Result<Vec<ContentBlock>>>>,
    pub requests: Arc<Mutex<Vec<(String, NormalizedContent)>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of replies
    pub fn new(responses: Vec<Vec<ContentBlock>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            responses: Mutex::new(vec![Err(anyhow!(message.to_string()))]),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        system: &str,
        content: &NormalizedContent,
    ) -> Result<(Vec<ContentBlock>, ProviderUsage)> {
        self.requests
            .lock()
            .unwrap()
            .push((system.to_string(), content.clone()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty reply if no more pre-configured responses
            Ok((Vec::new(), ProviderUsage::default()))
        } else {
            responses
                .remove(0)
                .map(|blocks| (blocks, ProviderUsage::default()))
        }
    }
}
