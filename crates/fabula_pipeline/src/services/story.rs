//! Story service.

use crate::generators::{StoryGenerator, StoryParams};
use fabula_core::{Generated, NewStory, Story};
use fabula_error::FabulaResult;
use fabula_interface::{NovelRepository, TextDriver};
use uuid::Uuid;

/// Creates the root story row for a generation run.
pub struct StoryService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> StoryService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    /// Generate a story and persist it owned by `actor_id`.
    #[tracing::instrument(skip(self, params), fields(actor = %actor_id))]
    pub async fn generate_and_save(
        &self,
        actor_id: Uuid,
        params: &StoryParams,
    ) -> FabulaResult<Generated<Story>> {
        let generated = StoryGenerator::new(self.driver).generate(params).await?;
        let draft = generated.data;
        let story = self
            .repo
            .insert_story(NewStory {
                author_id: actor_id,
                title: draft.title,
                genre: draft.genre,
                tone: draft.tone,
                summary: draft.summary,
                moral_framework: draft.moral_framework,
            })
            .await?;
        tracing::info!(story_id = %story.id, "Persisted story");
        Ok(Generated::new(story, generated.metadata))
    }
}
