//! Scene summary generator.

use super::{STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request};
use crate::{context, prompts};
use fabula_core::{Chapter, Generated, Scene, SceneSummaryDraft, Story};
use fabula_error::FabulaResult;
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Outlines scenes for a chapter, one at a time, with prior scene summaries
/// as context so beats connect.
pub struct SceneSummaryGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> SceneSummaryGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate the outline for scene `current` of `total` (1-based).
    #[tracing::instrument(skip(self, story, chapter, prior_scenes), fields(current, total))]
    pub async fn generate(
        &self,
        story: &Story,
        chapter: &Chapter,
        prior_scenes: &[Scene],
        current: usize,
        total: usize,
    ) -> FabulaResult<Generated<SceneSummaryDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::scene_summary_prompt(
                &context::story_context(story),
                &context::chapter_context(chapter),
                &context::prior_scenes_context(prior_scenes),
                current,
                total,
            ),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: SceneSummaryDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(title = %draft.title, phase = %draft.cycle_phase, "Generated scene outline");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
