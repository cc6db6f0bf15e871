//! Character generator (batch kind).

use super::{
    ProgressFn, STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request,
};
use crate::{context, prompts};
use fabula_core::{CharacterDraft, Generated, Story};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Generates characters for a story, one structured call per character.
pub struct CharacterGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> CharacterGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate one character. `existing_names` keeps the model off names
    /// already taken; `current`/`total` are 1-based batch coordinates.
    #[tracing::instrument(skip(self, story, existing_names), fields(current, total))]
    pub async fn generate(
        &self,
        story: &Story,
        existing_names: &[String],
        current: usize,
        total: usize,
    ) -> FabulaResult<Generated<CharacterDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::character_prompt(
                &context::story_context(story),
                existing_names,
                current,
                total,
            ),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: CharacterDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(name = %draft.name, role = %draft.role, "Generated character draft");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }

    /// Generate `count` characters sequentially.
    ///
    /// Invokes the progress callback exactly once per completed item. The
    /// first failure aborts the batch as `BatchAborted`; already-generated
    /// drafts are dropped (persistence interleaving is the service's job).
    pub async fn generate_batch(
        &self,
        story: &Story,
        count: usize,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> FabulaResult<Generated<Vec<CharacterDraft>>> {
        let start = Instant::now();
        let mut drafts: Vec<CharacterDraft> = Vec::with_capacity(count);
        let mut names: Vec<String> = Vec::with_capacity(count);
        for current in 1..=count {
            let generated = self
                .generate(story, &names, current, count)
                .await
                .map_err(|e| {
                    PipelineError::new(PipelineErrorKind::BatchAborted {
                        item: current,
                        total: count,
                        source: Box::new(e),
                    })
                })?;
            names.push(generated.data.name.clone());
            drafts.push(generated.data);
            if let Some(cb) = on_progress.as_deref_mut() {
                cb(current, count);
            }
        }
        Ok(Generated::new(
            drafts,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
