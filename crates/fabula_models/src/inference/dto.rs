//! Wire types for the self-hosted inference server.
//!
//! Text endpoint: `POST /api/v1/text/generate`. Image endpoint:
//! `POST /api/v1/image/generate`, returning base64-encoded bytes.

use fabula_core::GenerateRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TextGenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextGenerationResponse {
    pub text: String,
    pub model: String,
    #[serde(default)]
    pub tokens_used: Option<u32>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ImageGenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageGenerationResponse {
    /// Base64-encoded image bytes
    pub image: String,
    #[serde(default = "default_mime")]
    pub mime_type: String,
}

fn default_mime() -> String {
    "image/png".to_string()
}

/// Build the request body. The system prompt has no dedicated field on this
/// wire; it is prepended to the prompt separated by a blank line.
pub(crate) fn to_text_request(
    req: &GenerateRequest,
    schema: Option<&Value>,
) -> TextGenerationRequest {
    let prompt = match &req.system_prompt {
        Some(system) => format!("{}\n\n{}", system, req.prompt),
        None => req.prompt.clone(),
    };
    TextGenerationRequest {
        prompt,
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        top_p: req.top_p,
        stop_sequences: req.stop_sequences.clone(),
        response_format: schema.map(|_| "json".to_string()),
        response_schema: schema.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_prompt_is_prepended() {
        let req = GenerateRequest::builder()
            .prompt("Write the scene.")
            .system_prompt("You are a novelist.")
            .build()
            .unwrap();
        let body = to_text_request(&req, None);
        assert!(body.prompt.starts_with("You are a novelist.\n\n"));
        assert!(body.prompt.ends_with("Write the scene."));
    }

    #[test]
    fn structured_request_carries_schema() {
        let req = GenerateRequest::builder().prompt("p").build().unwrap();
        let schema = json!({"type": "object"});
        let body = to_text_request(&req, Some(&schema));
        assert_eq!(body.response_format.as_deref(), Some("json"));
        assert_eq!(body.response_schema, Some(schema));
    }
}
