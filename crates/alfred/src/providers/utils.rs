use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};

use super::base::ProviderUsage;
use crate::models::content::{ContentBlock, ImageFormat, NormalizedContent};

/// Convert normalized content into an OpenAI message `content` value
///   plain text stays a string, blocks become a list of typed parts
pub fn content_to_openai_spec(content: &NormalizedContent) -> Value {
    match content {
        NormalizedContent::Text(text) => json!(text),
        NormalizedContent::Blocks(blocks) => {
            let parts: Vec<Value> = blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Text(text) => json!({
                        "type": "text",
                        "text": text,
                    }),
                    ContentBlock::Image { format, bytes } => convert_image(format, bytes),
                })
                .collect();
            json!(parts)
        }
    }
}

/// Re-encode raw image bytes as an inline data url part
pub fn convert_image(format: &ImageFormat, bytes: &[u8]) -> Value {
    json!({
        "type": "image_url",
        "image_url": {
            "url": format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes))
        }
    })
}

/// Build the messages array: the system prompt followed by one user turn
pub fn messages_to_openai_spec(system: &str, content: &NormalizedContent) -> Vec<Value> {
    vec![
        json!({
            "role": "system",
            "content": system
        }),
        json!({
            "role": "user",
            "content": content_to_openai_spec(content)
        }),
    ]
}

/// Build a full chat completions payload, adding only the optional parameters that are set
pub fn create_request(
    model: &str,
    system: &str,
    content: &NormalizedContent,
    temperature: Option<f32>,
    max_tokens: Option<i32>,
) -> Value {
    let mut payload = json!({
        "model": model,
        "messages": messages_to_openai_spec(system, content),
    });

    if let Some(object) = payload.as_object_mut() {
        if let Some(temp) = temperature {
            object.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = max_tokens {
            object.insert("max_tokens".to_string(), json!(tokens));
        }
    }

    payload
}

/// Convert an OpenAI API response into reply content blocks
pub fn openai_response_to_blocks(response: &Value) -> Result<Vec<ContentBlock>> {
    let message = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("No choices in response"))?;

    let blocks = match message.get("content") {
        Some(Value::String(text)) => vec![ContentBlock::text(text.as_str())],
        Some(Value::Array(parts)) => parts
            .iter()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .map(ContentBlock::text)
            .collect(),
        _ => Vec::new(),
    };

    Ok(blocks)
}

pub fn get_usage(data: &Value) -> Result<ProviderUsage> {
    let usage = data
        .get("usage")
        .ok_or_else(|| anyhow!("No usage data in response"))?;

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Ok(ProviderUsage::new(input_tokens, output_tokens, total_tokens))
}

#[derive(Debug, thiserror::Error)]
#[error("Context length exceeded. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_stays_a_string() {
        let spec = messages_to_openai_spec("Be polite.", &NormalizedContent::text("Hello"));

        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[0]["content"], "Be polite.");
        assert_eq!(spec[1]["role"], "user");
        assert_eq!(spec[1]["content"], "Hello");
    }

    #[test]
    fn test_blocks_become_typed_parts() {
        let content = NormalizedContent::Blocks(vec![
            ContentBlock::text("Describe this"),
            ContentBlock::image(ImageFormat::Jpeg, b"hello".to_vec()),
        ]);

        let spec = content_to_openai_spec(&content);

        assert_eq!(
            spec,
            json!([
                {"type": "text", "text": "Describe this"},
                {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,aGVsbG8="}}
            ])
        );
    }

    #[test]
    fn test_create_request_optional_parameters() {
        let payload = create_request(
            "gpt-4o",
            "system",
            &NormalizedContent::text("hi"),
            Some(0.5),
            None,
        );
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["temperature"], json!(0.5));
        assert!(payload.get("max_tokens").is_none());

        let payload = create_request("gpt-4o", "system", &NormalizedContent::text("hi"), None, Some(256));
        assert!(payload.get("temperature").is_none());
        assert_eq!(payload["max_tokens"], json!(256));
    }

    #[test]
    fn test_openai_response_to_blocks_text() -> Result<()> {
        let response = json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Good evening, sir."}
            }]
        });

        let blocks = openai_response_to_blocks(&response)?;
        assert_eq!(blocks, vec![ContentBlock::text("Good evening, sir.")]);
        Ok(())
    }

    #[test]
    fn test_openai_response_to_blocks_parts() -> Result<()> {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": "First"},
                        {"type": "refusal", "refusal": "nope"},
                        {"type": "text", "text": "Second"}
                    ]
                }
            }]
        });

        let blocks = openai_response_to_blocks(&response)?;
        assert_eq!(
            blocks,
            vec![ContentBlock::text("First"), ContentBlock::text("Second")]
        );
        Ok(())
    }

    #[test]
    fn test_openai_response_to_blocks_null_content() -> Result<()> {
        let response = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert!(openai_response_to_blocks(&response)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_openai_response_without_choices() {
        let result = openai_response_to_blocks(&json!({"choices": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_get_usage_fills_total() -> Result<()> {
        let usage = get_usage(&json!({"usage": {"prompt_tokens": 7, "completion_tokens": 3}}))?;
        assert_eq!(usage.total_tokens, Some(10));
        assert!(get_usage(&json!({})).is_err());
        Ok(())
    }

    #[test]
    fn test_check_openai_context_length_error() {
        let error = json!({
            "code": "context_length_exceeded",
            "message": "This message is too long"
        });

        let result = check_openai_context_length_error(&error);
        assert!(result.is_some());
        assert_eq!(
            result.unwrap().to_string(),
            "Context length exceeded. Message: This message is too long"
        );

        let error = json!({
            "code": "other_error",
            "message": "Some other error"
        });
        assert!(check_openai_context_length_error(&error).is_none());
    }
}
