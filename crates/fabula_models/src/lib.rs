//! AI provider backends for Fabula.
//!
//! Two interchangeable backends implement the [`fabula_interface::TextDriver`]
//! contract:
//!
//! - [`GeminiClient`] — the hosted Gemini REST API, with structured output
//!   via `responseSchema` and bounded retry with backoff on transient
//!   failures
//! - [`InferenceClient`] — a self-hosted inference server speaking the
//!   `/api/v1/text/generate` wire protocol, with a configurable request
//!   timeout; also implements [`fabula_interface::ImageDriver`]
//!
//! Backend selection is static configuration (see [`ProviderConfig`]); the
//! constructed [`Provider`] is injected into generators and services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gemini;
mod inference;
mod provider;
mod retry;

pub use config::{GeminiConfig, InferenceConfig, ProviderConfig};
pub use gemini::GeminiClient;
pub use inference::InferenceClient;
pub use provider::Provider;
