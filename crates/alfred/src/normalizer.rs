//! Turns openai-shaped chat messages into content blocks for the agent runtime
//!
//! Inline images arrive as `data:image/<subtype>;base64,<payload>` urls and are
//! decoded in place. Anything else is treated as a remote url and downloaded
//! once through the [`ImageFetcher`], with no retry.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::errors::{ChatError, ChatResult, FetchError};
use crate::fetcher::{ImageFetcher, BROWSER_HEADERS, IMAGE_FETCH_TIMEOUT};
use crate::models::chat::{ChatMessage, ContentPart, MessageContent};
use crate::models::content::{ContentBlock, ImageFormat, NormalizedContent};

lazy_static! {
    static ref DATA_URL_PREFIX: Regex = Regex::new(r"^data:image/[a-z]*;base64,\s*").unwrap();
    static ref DATA_URL_SUBTYPE: Regex = Regex::new(r"data:image/([a-z]+);").unwrap();
    static ref URL_EXTENSION: Regex = Regex::new(r"\.([a-z]+)(?:\?|$)").unwrap();
}

pub struct MessageNormalizer {
    fetcher: Arc<dyn ImageFetcher>,
}

impl MessageNormalizer {
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Convert one message into the runtime's content representation
    ///
    /// Text-only messages pass through untouched. Multimodal messages become one
    /// block per part, in the order they were sent.
    pub async fn normalize(&self, message: &ChatMessage) -> ChatResult<NormalizedContent> {
        match &message.content {
            MessageContent::Text(text) => Ok(NormalizedContent::Text(text.clone())),
            MessageContent::Parts(parts) => {
                let mut blocks = Vec::with_capacity(parts.len());
                for part in parts {
                    let block = match part {
                        ContentPart::Text { text } => ContentBlock::text(text.clone()),
                        ContentPart::ImageUrl { image_url } => {
                            let bytes = self.resolve_image(&image_url.url).await?;
                            ContentBlock::image(detect_format(&image_url.url), bytes)
                        }
                    };
                    blocks.push(block);
                }
                Ok(NormalizedContent::Blocks(blocks))
            }
        }
    }

    /// Produce the raw bytes behind an image url
    pub async fn resolve_image(&self, url: &str) -> ChatResult<Vec<u8>> {
        if let Some(decoded) = decode_data_url(url) {
            return decoded;
        }

        tracing::debug!("fetching remote image {}", url);
        let image = self
            .fetcher
            .get(url, &BROWSER_HEADERS, IMAGE_FETCH_TIMEOUT)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !image.is_ok() {
            tracing::warn!("image host returned {} for {}", image.status, url);
            return Err(FetchError::Status(image.status).into());
        }
        Ok(image.bytes)
    }
}

/// Decode an inline base64 image, or `None` when the url is not a data url
pub fn decode_data_url(url: &str) -> Option<ChatResult<Vec<u8>>> {
    let prefix = DATA_URL_PREFIX.find(url)?;
    let payload: String = url[prefix.end()..]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Some(
        BASE64
            .decode(payload)
            .map_err(|e| ChatError::ClientInput(format!("Invalid base64 image data: {}", e))),
    )
}

/// Work out the image format from its url
///
/// A data url's declared subtype wins and is used verbatim. Otherwise the file
/// extension is mapped onto the supported formats, defaulting to png.
pub fn detect_format(url: &str) -> ImageFormat {
    if let Some(captures) = DATA_URL_SUBTYPE.captures(url) {
        return ImageFormat::from_subtype(&captures[1]);
    }

    let lowered = url.to_lowercase();
    match URL_EXTENSION.captures(&lowered) {
        Some(captures) => ImageFormat::from_extension(&captures[1]),
        None => ImageFormat::Png,
    }
}

/// The plain text of a message, used only for token estimation
pub fn extract_text(message: &ChatMessage) -> String {
    match &message.content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
