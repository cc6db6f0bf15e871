//! Part service.

use super::{ensure_owner, require_story, resolve_setting_ids};
use crate::generators::PartGenerator;
use fabula_core::{Generated, NewPart, Part};
use fabula_error::FabulaResult;
use fabula_interface::{NovelRepository, TextDriver};
use uuid::Uuid;

/// Creates parts one at a time (the incremental variant).
pub struct PartService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> PartService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    /// Generate and persist the next part of a planned `total_planned`.
    ///
    /// The part's position comes from how many parts already exist; setting
    /// names in the draft are resolved against persisted settings.
    #[tracing::instrument(skip(self), fields(story = %story_id))]
    pub async fn generate_and_save(
        &self,
        story_id: Uuid,
        actor_id: Uuid,
        total_planned: usize,
    ) -> FabulaResult<Generated<Part>> {
        let story = require_story(self.repo, story_id).await?;
        ensure_owner(&story, actor_id)?;

        let characters = self.repo.list_characters(story_id).await?;
        let settings = self.repo.list_settings(story_id).await?;
        let order_index = self.repo.list_parts(story_id).await?.len() as i32;

        let generated = PartGenerator::new(self.driver)
            .generate(
                &story,
                &characters,
                &settings,
                order_index as usize + 1,
                total_planned,
            )
            .await?;
        let draft = generated.data;
        let setting_ids = resolve_setting_ids(&draft.setting_names, &settings);

        let part = self
            .repo
            .insert_part(NewPart {
                story_id,
                title: draft.title,
                summary: draft.summary,
                character_arcs: draft.character_arcs,
                setting_ids,
                order_index,
            })
            .await?;
        tracing::info!(part_id = %part.id, order = part.order_index, "Persisted part");
        Ok(Generated::new(part, generated.metadata))
    }
}
