//! Fabula: an AI generation pipeline for serialized fiction and comic
//! adaptations.
//!
//! This facade crate re-exports the public API of the workspace and
//! carries the `fabula` binary. Library users depend on this crate and
//! reach everything through it; the sub-crates stay an implementation
//! detail.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;

pub use cli::{Cli, Commands};
pub use fabula_core::*;
#[cfg(feature = "database")]
pub use fabula_database::{PostgresNovelRepository, establish_connection};
pub use fabula_error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use fabula_interface::{ImageDriver, NovelRepository, TextDriver, generate_structured};
pub use fabula_models::{
    GeminiClient, GeminiConfig, InferenceClient, InferenceConfig, Provider, ProviderConfig,
};
pub use fabula_pipeline::{
    GeneratedNovel, GenerationOptions, MemoryNovelRepository, NovelOrchestrator, PhaseEvent,
    StoryGenerator, StoryParams,
};
pub use fabula_storage::{FileSystemStorage, ImagePath, ImageStorage};
