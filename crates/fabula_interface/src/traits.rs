//! Trait definitions for generation backends.

use async_trait::async_trait;
use fabula_core::{GenerateRequest, GeneratedImage, TextGeneration};
use fabula_error::FabulaResult;

/// Core trait that all text generation backends must implement.
///
/// No retry or backoff is promised at this seam; bounded retry for transient
/// upstream failures lives inside the backend implementations, and the
/// quality-improvement loop owns its own rewrite cycle.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate free text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` with `EmptyResponse` when the backend returns
    /// blank text, or `Api`/`Request`/`Timeout` on transport failures.
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration>;

    /// Generate a JSON-constrained completion satisfying `schema`.
    ///
    /// The backend is trusted to emit well-formed JSON but never trusted to
    /// satisfy semantic constraints; callers re-validate the returned value
    /// by typed deserialization (see [`crate::generate_structured`]).
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` when the backend's text is not valid
    /// JSON, plus the same transport errors as [`TextDriver::generate`].
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> FabulaResult<serde_json::Value>;

    /// Provider name (e.g., "gemini", "inference-server").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: TextDriver + ?Sized> TextDriver for &T {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration> {
        (**self).generate(req).await
    }

    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> FabulaResult<serde_json::Value> {
        (**self).generate_json(req, schema).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Trait for backends that can generate images.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate an image for a visual prompt.
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> FabulaResult<GeneratedImage>;
}
