//! Provider selection: one constructed backend behind one type.

use crate::{GeminiClient, InferenceClient, ProviderConfig};
use async_trait::async_trait;
use fabula_core::{GenerateRequest, TextGeneration};
use fabula_error::FabulaResult;
use fabula_interface::TextDriver;
use serde_json::Value;

/// The configured text backend.
///
/// Strategy selection happens once, at construction; callers hold a
/// `Provider` (or any other `TextDriver`) injected into them and never
/// consult configuration again.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Hosted Gemini API
    Gemini(GeminiClient),
    /// Self-hosted inference server
    Inference(InferenceClient),
}

impl Provider {
    /// Construct the backend named by `config`.
    pub fn from_config(config: &ProviderConfig) -> FabulaResult<Self> {
        match config {
            ProviderConfig::Gemini(gemini) => Ok(Self::Gemini(GeminiClient::new(gemini)?)),
            ProviderConfig::Inference(inference) => {
                Ok(Self::Inference(InferenceClient::new(inference)?))
            }
        }
    }
}

#[async_trait]
impl TextDriver for Provider {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration> {
        match self {
            Self::Gemini(client) => client.generate(req).await,
            Self::Inference(client) => client.generate(req).await,
        }
    }

    async fn generate_json(&self, req: &GenerateRequest, schema: &Value) -> FabulaResult<Value> {
        match self {
            Self::Gemini(client) => client.generate_json(req, schema).await,
            Self::Inference(client) => client.generate_json(req, schema).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Self::Gemini(client) => client.provider_name(),
            Self::Inference(client) => client.provider_name(),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Gemini(client) => client.model_name(),
            Self::Inference(client) => client.model_name(),
        }
    }
}
