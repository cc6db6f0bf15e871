//! Self-hosted inference server client.

use super::dto::{
    ImageGenerationRequest, ImageGenerationResponse, TextGenerationResponse, to_text_request,
};
use crate::InferenceConfig;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use fabula_core::{GenerateRequest, GeneratedImage, TextGeneration};
use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind, SchemaError, SchemaErrorKind};
use fabula_interface::{ImageDriver, TextDriver};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for a self-hosted inference server.
///
/// The only timeout in the pipeline lives here, at the HTTP-client level;
/// the hosted backend relies on the provider's own limits.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
}

impl InferenceClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the HTTP client cannot be constructed.
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn new(config: &InferenceConfig) -> FabulaResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::InvalidConfiguration(e.to_string()))
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(url);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        builder
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::new(ProviderErrorKind::Timeout(self.timeout_secs))
        } else {
            ProviderError::new(ProviderErrorKind::Request(err.to_string()))
        }
    }

    async fn call_text(
        &self,
        req: &GenerateRequest,
        schema: Option<&Value>,
    ) -> FabulaResult<TextGeneration> {
        let url = format!("{}/api/v1/text/generate", self.base_url);
        let body = to_text_request(req, schema);
        debug!(url = %url, structured = schema.is_some(), "Sending inference server request");

        let response = self
            .request(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api { status, message }))?;
        }

        let parsed: TextGenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Request(e.to_string())))?;

        if parsed.text.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse))?;
        }

        Ok(TextGeneration {
            text: parsed.text,
            model: parsed.model,
            tokens_used: parsed.tokens_used,
            finish_reason: parsed.finish_reason,
        })
    }
}

#[async_trait]
impl TextDriver for InferenceClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration> {
        self.call_text(req, None).await
    }

    #[instrument(skip(self, req, schema))]
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &Value,
    ) -> FabulaResult<Value> {
        let generation = self.call_text(req, Some(schema)).await?;
        serde_json::from_str(&generation.text).map_err(|e| {
            SchemaError::new(SchemaErrorKind::Parse(format!(
                "Inference server returned invalid JSON: {}",
                e
            )))
            .into()
        })
    }

    fn provider_name(&self) -> &'static str {
        "inference-server"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageDriver for InferenceClient {
    #[instrument(skip(self, prompt))]
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> FabulaResult<GeneratedImage> {
        let url = format!("{}/api/v1/image/generate", self.base_url);
        let body = ImageGenerationRequest {
            prompt: prompt.to_string(),
            width,
            height,
        };

        let response = self
            .request(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api { status, message }))?;
        }

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Request(e.to_string())))?;

        let data = BASE64.decode(parsed.image.as_bytes()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::Request(format!(
                "Invalid base64 image payload: {}",
                e
            )))
        })?;

        Ok(GeneratedImage {
            data,
            mime: parsed.mime_type,
        })
    }
}
