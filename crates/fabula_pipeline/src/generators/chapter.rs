//! Chapter generator.

use super::{STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request};
use crate::{context, prompts};
use fabula_core::{ChapterDraft, Character, Generated, Part, Setting, Story};
use fabula_error::FabulaResult;
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Generates one chapter within a part.
pub struct ChapterGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> ChapterGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate chapter `current` of `total` (1-based) for `part`.
    #[tracing::instrument(skip(self, story, characters, settings, part), fields(current, total))]
    pub async fn generate(
        &self,
        story: &Story,
        characters: &[Character],
        settings: &[Setting],
        part: &Part,
        current: usize,
        total: usize,
    ) -> FabulaResult<Generated<ChapterDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::chapter_prompt(
                &context::story_context(story),
                &context::characters_context(characters),
                &context::settings_context(settings),
                &context::part_context(part),
                current,
                total,
            ),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: ChapterDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(title = %draft.title, "Generated chapter draft");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
