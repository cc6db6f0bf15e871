//! Chapter service.

use super::{ensure_owner, require_part, require_story, resolve_character_ids, resolve_setting_ids};
use crate::generators::ChapterGenerator;
use fabula_core::{Chapter, Generated, NewChapter};
use fabula_error::FabulaResult;
use fabula_interface::{NovelRepository, TextDriver};
use uuid::Uuid;

/// Creates chapters within a part, one at a time.
pub struct ChapterService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> ChapterService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    /// Generate and persist the next chapter of a planned `total_planned`.
    ///
    /// An arc position the generator left empty defaults to `beginning`;
    /// character and setting names are resolved against persisted rows.
    #[tracing::instrument(skip(self), fields(part = %part_id))]
    pub async fn generate_and_save(
        &self,
        part_id: Uuid,
        actor_id: Uuid,
        total_planned: usize,
    ) -> FabulaResult<Generated<Chapter>> {
        let part = require_part(self.repo, part_id).await?;
        let story = require_story(self.repo, part.story_id).await?;
        ensure_owner(&story, actor_id)?;

        let characters = self.repo.list_characters(story.id).await?;
        let settings = self.repo.list_settings(story.id).await?;
        let order_index = self.repo.list_chapters(part_id).await?.len() as i32;

        let generated = ChapterGenerator::new(self.driver)
            .generate(
                &story,
                &characters,
                &settings,
                &part,
                order_index as usize + 1,
                total_planned,
            )
            .await?;
        let draft = generated.data;

        let chapter = self
            .repo
            .insert_chapter(NewChapter {
                part_id,
                title: draft.title,
                summary: draft.summary,
                arc_position: draft.arc_position.unwrap_or_default(),
                adversity_type: draft.adversity_type,
                virtue_type: draft.virtue_type,
                seeds_planted: draft.seeds_planted,
                seeds_resolved: draft.seeds_resolved,
                focus_character_ids: resolve_character_ids(
                    &draft.focus_character_names,
                    &characters,
                ),
                setting_ids: resolve_setting_ids(&draft.setting_names, &settings),
                order_index,
            })
            .await?;
        tracing::info!(chapter_id = %chapter.id, order = chapter.order_index, "Persisted chapter");
        Ok(Generated::new(chapter, generated.metadata))
    }
}
