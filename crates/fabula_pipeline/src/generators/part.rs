//! Part generator.

use super::{STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request};
use crate::{context, prompts};
use fabula_core::{Character, Generated, PartDraft, Setting, Story};
use fabula_error::FabulaResult;
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Generates one part at a time (parts are created incrementally).
pub struct PartGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> PartGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate part `current` of `total` (1-based).
    #[tracing::instrument(skip(self, story, characters, settings), fields(current, total))]
    pub async fn generate(
        &self,
        story: &Story,
        characters: &[Character],
        settings: &[Setting],
        current: usize,
        total: usize,
    ) -> FabulaResult<Generated<PartDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::part_prompt(
                &context::story_context(story),
                &context::characters_context(characters),
                &context::settings_context(settings),
                current,
                total,
            ),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: PartDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(title = %draft.title, arcs = draft.character_arcs.len(), "Generated part draft");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
