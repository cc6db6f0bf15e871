//! Entity generators.
//!
//! One generator per entity kind. Generators hold a driver reference, never
//! touch persistence, and return [`Generated`] drafts: data plus timing
//! metadata. Batch kinds (characters, settings) iterate sequentially and
//! invoke an optional `(current, total)` progress callback after each item;
//! the first failure aborts the remaining items.

mod chapter;
mod character;
mod evaluation;
mod part;
mod scene_content;
mod scene_summary;
mod setting;
mod story;
mod toonplay;

pub use chapter::ChapterGenerator;
pub use character::CharacterGenerator;
pub use evaluation::{ProseEvaluator, ToonplayEvaluator};
pub use part::PartGenerator;
pub use scene_content::{SceneContentGenerator, SceneProse};
pub use scene_summary::SceneSummaryGenerator;
pub use setting::SettingGenerator;
pub use story::{StoryGenerator, StoryParams};
pub use toonplay::ToonplayGenerator;

use fabula_core::{GenerateRequest, GenerationMetadata};
use std::time::Instant;

/// Progress callback for batch generation: `(current, total)`, called once
/// per completed item with `current` running 1..=N.
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize);

pub(crate) fn metadata_since(start: Instant, model: &str) -> GenerationMetadata {
    GenerationMetadata {
        duration_ms: start.elapsed().as_millis() as u64,
        model: Some(model.to_string()),
    }
}

pub(crate) fn request(
    prompt: String,
    system_prompt: Option<String>,
    temperature: f32,
    max_tokens: u32,
) -> GenerateRequest {
    GenerateRequest {
        prompt,
        system_prompt,
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        ..GenerateRequest::default()
    }
}

// Sampling defaults per phase. Prose runs hot for diversity; structured
// phases stay cooler so vocabularies and counts come back intact.
pub(crate) const STRUCTURED_TEMPERATURE: f32 = 0.7;
pub(crate) const PROSE_TEMPERATURE: f32 = 0.85;
pub(crate) const STRUCTURED_MAX_TOKENS: u32 = 2048;
pub(crate) const PROSE_MAX_TOKENS: u32 = 4096;
