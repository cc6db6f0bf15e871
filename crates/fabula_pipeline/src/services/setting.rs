//! Setting service (batch kind).

use super::{ensure_owner, require_story};
use crate::generators::{ProgressFn, SettingGenerator, metadata_since};
use fabula_core::{Generated, NewSetting, Setting};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{NovelRepository, TextDriver};
use std::time::Instant;
use uuid::Uuid;

/// Creates a batch of settings for a story.
pub struct SettingService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> SettingService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    /// Generate and persist `count` settings; same batch contract as
    /// [`super::CharacterService::generate_and_save_batch`].
    #[tracing::instrument(skip(self, on_progress), fields(story = %story_id, count))]
    pub async fn generate_and_save_batch(
        &self,
        story_id: Uuid,
        actor_id: Uuid,
        count: usize,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> FabulaResult<Generated<Vec<Setting>>> {
        let start = Instant::now();
        let story = require_story(self.repo, story_id).await?;
        ensure_owner(&story, actor_id)?;

        let generator = SettingGenerator::new(self.driver);
        let characters = self.repo.list_characters(story_id).await?;
        let existing = self.repo.list_settings(story_id).await?;
        let base_index = existing.len() as i32;
        let mut names: Vec<String> = existing.into_iter().map(|s| s.name).collect();

        let mut saved = Vec::with_capacity(count);
        for current in 1..=count {
            let result = async {
                let draft = generator
                    .generate(&story, &characters, &names, current, count)
                    .await?
                    .data;
                self.repo
                    .insert_setting(NewSetting {
                        story_id,
                        name: draft.name,
                        description: draft.description,
                        mood: draft.mood,
                        sensory: draft.sensory,
                        symbolism: draft.symbolism,
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

        tracing::info!(saved = saved.len(), "Persisted setting batch");
        Ok(Generated::new(
            saved,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
