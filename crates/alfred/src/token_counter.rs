use crate::models::chat::{ChatMessage, Usage};
use crate::normalizer::extract_text;

/// Flat surcharge for every image part in a prompt
pub const IMAGE_TOKEN_ESTIMATE: usize = 85;

/// Approximate token count: whitespace-separated words, not a real tokenizer
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Tokens attributed to one prompt message
pub fn message_tokens(message: &ChatMessage) -> usize {
    count_words(&extract_text(message)) + IMAGE_TOKEN_ESTIMATE * message.image_count()
}

/// Estimate usage for a whole conversation and the reply it produced
pub fn estimate_usage(messages: &[ChatMessage], reply: &str) -> Usage {
    let prompt_tokens = messages.iter().map(message_tokens).sum();
    Usage::new(prompt_tokens, count_words(reply))
}
