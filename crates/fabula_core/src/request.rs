//! Request and response types for AI text and image generation.

use serde::{Deserialize, Serialize};

/// A text generation request.
///
/// # Examples
///
/// ```
/// use fabula_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .prompt("Summarize the first act.")
///     .temperature(0.7)
///     .max_tokens(1024_u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.temperature, Some(0.7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct GenerateRequest {
    /// The user prompt
    pub prompt: String,
    /// Optional system prompt
    pub system_prompt: Option<String>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Nucleus sampling parameter
    pub top_p: Option<f32>,
    /// Stop sequences to end generation
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// A completed text generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGeneration {
    /// The generated text
    pub text: String,
    /// Model that produced it
    pub model: String,
    /// Tokens consumed, when the provider reports them
    pub tokens_used: Option<u32>,
    /// Why generation stopped ("stop", "length", ...), when reported
    pub finish_reason: Option<String>,
}

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type ("image/png", ...)
    pub mime: String,
}
