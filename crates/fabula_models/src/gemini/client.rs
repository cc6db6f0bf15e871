//! Gemini REST client.

use super::dto::{GeminiResponse, to_gemini_request};
use crate::GeminiConfig;
use crate::retry::with_backoff;
use async_trait::async_trait;
use fabula_core::{GenerateRequest, TextGeneration};
use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind, SchemaError, SchemaErrorKind};
use fabula_interface::TextDriver;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the hosted Gemini API.
///
/// Transient failures (429, 5xx, transport errors) are retried with bounded
/// exponential backoff; everything else propagates to the caller immediately.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the API key is blank.
    #[instrument(skip_all)]
    pub fn new(config: &GeminiConfig) -> FabulaResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::InvalidConfiguration(
                "Gemini API key is empty".to_string(),
            )))?;
        }
        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config.model.clone(),
        })
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn call(&self, req: &GenerateRequest, schema: Option<&Value>) -> FabulaResult<TextGeneration> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = to_gemini_request(req, schema);

        let generation = with_backoff(|| async {
            debug!(url = %url, structured = schema.is_some(), "Sending Gemini request");
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| ProviderError::new(ProviderErrorKind::Request(e.to_string())))?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::new(ProviderErrorKind::Api { status, message }).into());
            }

            let parsed: GeminiResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::new(ProviderErrorKind::Request(e.to_string())))?;

            let text = parsed.text();
            if text.trim().is_empty() {
                return Err(ProviderError::new(ProviderErrorKind::EmptyResponse).into());
            }

            Ok(TextGeneration {
                text,
                model: parsed
                    .model_version
                    .clone()
                    .unwrap_or_else(|| self.model.clone()),
                tokens_used: parsed
                    .usage_metadata
                    .as_ref()
                    .and_then(|u| u.total_token_count),
                finish_reason: parsed.finish_reason(),
            })
        })
        .await?;

        Ok(generation)
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration> {
        self.call(req, None).await
    }

    #[instrument(skip(self, req, schema))]
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &Value,
    ) -> FabulaResult<Value> {
        let generation = self.call(req, Some(schema)).await?;
        serde_json::from_str(&generation.text).map_err(|e| {
            SchemaError::new(SchemaErrorKind::Parse(format!(
                "Gemini returned invalid JSON: {}",
                e
            )))
            .into()
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
