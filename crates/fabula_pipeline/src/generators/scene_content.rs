//! Scene prose generator.
//!
//! The only free-text generator in the pipeline: no schema, high
//! temperature for prose diversity, larger token budget, word count
//! computed as a side product.

use super::{PROSE_MAX_TOKENS, PROSE_TEMPERATURE, metadata_since, request};
use crate::{context, prompts};
use fabula_core::{Chapter, Character, Generated, Scene, Setting, Story};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::TextDriver;
use std::time::Instant;

/// Generated scene prose plus its word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneProse {
    /// The scene text
    pub content: String,
    /// Whitespace-delimited word count
    pub word_count: i32,
}

/// Writes full prose for an outlined scene.
pub struct SceneContentGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> SceneContentGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate prose for `scene`.
    ///
    /// # Errors
    ///
    /// `EmptyContent` when the provider returns only whitespace.
    #[tracing::instrument(
        skip_all,
        fields(scene = %scene.title, provider = self.driver.provider_name())
    )]
    pub async fn generate(
        &self,
        story: &Story,
        characters: &[Character],
        settings: &[Setting],
        chapter: &Chapter,
        prior_scenes: &[Scene],
        scene: &Scene,
        language: &str,
    ) -> FabulaResult<Generated<SceneProse>> {
        let start = Instant::now();
        let req = request(
            prompts::scene_content_prompt(
                &context::story_context(story),
                &context::characters_context(characters),
                &context::settings_context(settings),
                &context::chapter_context(chapter),
                &context::prior_scenes_context(prior_scenes),
                &scene.title,
                &scene.summary,
                language,
            ),
            None,
            PROSE_TEMPERATURE,
            PROSE_MAX_TOKENS,
        );
        let generation = self.driver.generate(&req).await?;
        let content = generation.text.trim().to_string();
        if content.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyContent(
                scene.title.clone(),
            )))?;
        }
        let word_count = content.split_whitespace().count() as i32;
        tracing::info!(words = word_count, "Generated scene prose");
        Ok(Generated::new(
            SceneProse {
                content,
                word_count,
            },
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
