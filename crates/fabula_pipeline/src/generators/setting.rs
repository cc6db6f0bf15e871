//! Setting generator (batch kind).

use super::{
    ProgressFn, STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request,
};
use crate::{context, prompts};
use fabula_core::{Character, Generated, SettingDraft, Story};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Generates settings for a story, one structured call per setting.
pub struct SettingGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> SettingGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate one setting.
    #[tracing::instrument(skip(self, story, characters, existing_names), fields(current, total))]
    pub async fn generate(
        &self,
        story: &Story,
        characters: &[Character],
        existing_names: &[String],
        current: usize,
        total: usize,
    ) -> FabulaResult<Generated<SettingDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::setting_prompt(
                &context::story_context(story),
                &context::characters_context(characters),
                existing_names,
                current,
                total,
            ),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: SettingDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(name = %draft.name, "Generated setting draft");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }

    /// Generate `count` settings sequentially; same batch contract as
    /// [`super::CharacterGenerator::generate_batch`].
    pub async fn generate_batch(
        &self,
        story: &Story,
        characters: &[Character],
        count: usize,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> FabulaResult<Generated<Vec<SettingDraft>>> {
        let start = Instant::now();
        let mut drafts: Vec<SettingDraft> = Vec::with_capacity(count);
        let mut names: Vec<String> = Vec::with_capacity(count);
        for current in 1..=count {
            let generated = self
                .generate(story, characters, &names, current, count)
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
