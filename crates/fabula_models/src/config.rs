//! Provider configuration.
//!
//! Loaded from an optional `fabula.toml` plus `FABULA__`-prefixed environment
//! variables; the selected backend is fixed at construction time.

use fabula_error::{ConfigError, FabulaResult};
use serde::Deserialize;

/// Hosted Gemini API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Model identifier
    #[serde(default = "GeminiConfig::default_model")]
    pub model: String,
}

impl GeminiConfig {
    fn default_model() -> String {
        "gemini-2.0-flash".to_string()
    }
}

/// Self-hosted inference server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Server base URL, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "InferenceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Model identifier advertised by the server
    #[serde(default = "InferenceConfig::default_model")]
    pub model: String,
}

impl InferenceConfig {
    fn default_timeout_secs() -> u64 {
        120
    }

    fn default_model() -> String {
        "llama-3.2-3b".to_string()
    }
}

/// Which backend to construct. Strategy selection, not runtime negotiation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "provider", rename_all = "kebab-case")]
pub enum ProviderConfig {
    /// Hosted Gemini API
    Gemini(GeminiConfig),
    /// Self-hosted inference server
    Inference(InferenceConfig),
}

impl ProviderConfig {
    /// Load configuration from `fabula.toml` (optional) and `FABULA__`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when no provider section is present or a
    /// required field is missing.
    pub fn load() -> FabulaResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("fabula").required(false))
            .add_source(::config::Environment::with_prefix("FABULA").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        let provider = settings
            .try_deserialize::<ProviderConfig>()
            .map_err(|e| ConfigError::new(format!("Invalid provider configuration: {}", e)))?;
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_config_from_toml() {
        let config: ProviderConfig = toml_from_str(
            r#"
            provider = "gemini"
            api_key = "test-key"
            "#,
        );
        match config {
            ProviderConfig::Gemini(g) => {
                assert_eq!(g.api_key, "test-key");
                assert_eq!(g.model, "gemini-2.0-flash");
            }
            other => panic!("expected gemini config, got {:?}", other),
        }
    }

    #[test]
    fn inference_config_defaults() {
        let config: ProviderConfig = toml_from_str(
            r#"
            provider = "inference"
            base_url = "http://localhost:8000"
            "#,
        );
        match config {
            ProviderConfig::Inference(i) => {
                assert_eq!(i.timeout_secs, 120);
                assert!(i.api_key.is_none());
            }
            other => panic!("expected inference config, got {:?}", other),
        }
    }

    fn toml_from_str(raw: &str) -> ProviderConfig {
        ::config::Config::builder()
            .add_source(::config::File::from_str(raw, ::config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
