//! Driver traits and the structured-output contract for Fabula providers.
//!
//! Two interchangeable backend families sit behind [`TextDriver`]: a hosted
//! LLM API and a self-hosted inference server. Selection is by static
//! configuration, not runtime negotiation; callers receive a constructed
//! driver instance and never reach for a global.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod structured;
mod traits;

pub use repository::NovelRepository;
pub use structured::{generate_structured, sanitize_schema, schema_for};
pub use traits::{ImageDriver, TextDriver};
