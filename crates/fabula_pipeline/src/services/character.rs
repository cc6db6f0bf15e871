//! Character service (batch kind).

use super::{ensure_owner, require_story};
use crate::generators::{CharacterGenerator, ProgressFn, metadata_since};
use fabula_core::{Character, Generated, NewCharacter};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{NovelRepository, TextDriver};
use std::time::Instant;
use uuid::Uuid;

/// Creates a batch of characters for a story.
pub struct CharacterService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> CharacterService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    /// Generate and persist `count` characters, one write per item.
    ///
    /// Each item is fully persisted before the next generation starts, so a
    /// mid-batch failure leaves the earlier characters in place; that
    /// partial result is the documented contract, reported as
    /// `BatchAborted`. The progress callback fires once per persisted item.
    #[tracing::instrument(skip(self, on_progress), fields(story = %story_id, count))]
    pub async fn generate_and_save_batch(
        &self,
        story_id: Uuid,
        actor_id: Uuid,
        count: usize,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> FabulaResult<Generated<Vec<Character>>> {
        let start = Instant::now();
        let story = require_story(self.repo, story_id).await?;
        ensure_owner(&story, actor_id)?;

        let generator = CharacterGenerator::new(self.driver);
        let existing = self.repo.list_characters(story_id).await?;
        let base_index = existing.len() as i32;
        let mut names: Vec<String> = existing.into_iter().map(|c| c.name).collect();

        let mut saved = Vec::with_capacity(count);
        for current in 1..=count {
            let result = async {
                let draft = generator.generate(&story, &names, current, count).await?.data;
                self.repo
                    .insert_character(NewCharacter {
                        story_id,
                        name: draft.name,
                        role: draft.role,
                        core_trait: draft.core_trait,
                        personality: draft.personality,
                        appearance: draft.appearance,
                        voice: draft.voice,
                        order_index: base_index + (current as i32 - 1),
                    })
                    .await
            }
            .await
            .map_err(|e| {
                PipelineError::new(PipelineErrorKind::BatchAborted {
                    item: current,
                    total: count,
                    source: Box::new(e),
                })
            })?;
            names.push(result.name.clone());
            saved.push(result);
            if let Some(cb) = on_progress.as_deref_mut() {
                cb(current, count);
            }
        }

        tracing::info!(saved = saved.len(), "Persisted character batch");
        Ok(Generated::new(
            saved,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
