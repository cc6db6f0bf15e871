//! Self-hosted inference server backend.

mod client;
mod dto;

pub use client::InferenceClient;
