//! Hosted Gemini REST backend.

mod client;
mod dto;

pub use client::GeminiClient;
