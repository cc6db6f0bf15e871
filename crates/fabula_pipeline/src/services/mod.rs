//! Persistence services: generate, validate, write, return database truth.
//!
//! One service per entity kind. Every method follows the same order:
//! fetch prerequisites (`NotFound` naming the missing id), check ownership,
//! invoke the generator, default-fill against the persistence shape, write,
//! and return the persisted row. The ownership check always runs before any
//! generator call.

mod chapter;
mod character;
mod part;
mod scene;
mod setting;
mod story;

pub use chapter::ChapterService;
pub use character::CharacterService;
pub use part::PartService;
pub use scene::{SceneService, ToonplayResult};
pub use setting::SettingService;
pub use story::StoryService;

use fabula_core::{Chapter, Character, Part, Scene, Setting, Story};
use fabula_error::{AccessError, FabulaResult};
use fabula_interface::NovelRepository;
use uuid::Uuid;

/// Check that `actor_id` owns `story`. The single ownership gate for every
/// service in the pipeline.
pub fn ensure_owner(story: &Story, actor_id: Uuid) -> FabulaResult<()> {
    if story.author_id != actor_id {
        tracing::warn!(
            story_id = %story.id,
            actor_id = %actor_id,
            "Ownership check failed"
        );
        return Err(AccessError::denied(story.id, actor_id))?;
    }
    Ok(())
}

pub(crate) async fn require_story(repo: &dyn NovelRepository, id: Uuid) -> FabulaResult<Story> {
    repo.get_story(id)
        .await?
        .ok_or_else(|| AccessError::not_found("story", id).into())
}

pub(crate) async fn require_part(repo: &dyn NovelRepository, id: Uuid) -> FabulaResult<Part> {
    repo.get_part(id)
        .await?
        .ok_or_else(|| AccessError::not_found("part", id).into())
}

pub(crate) async fn require_chapter(repo: &dyn NovelRepository, id: Uuid) -> FabulaResult<Chapter> {
    repo.get_chapter(id)
        .await?
        .ok_or_else(|| AccessError::not_found("chapter", id).into())
}

pub(crate) async fn require_scene(repo: &dyn NovelRepository, id: Uuid) -> FabulaResult<Scene> {
    repo.get_scene(id)
        .await?
        .ok_or_else(|| AccessError::not_found("scene", id).into())
}

/// Resolve AI-referenced setting names to persisted ids. Names the model
/// invented are logged and skipped rather than failing the write.
pub(crate) fn resolve_setting_ids(names: &[String], settings: &[Setting]) -> Vec<Uuid> {
    resolve_ids(names, settings.iter().map(|s| (s.name.as_str(), s.id)))
}

/// Resolve AI-referenced character names to persisted ids.
pub(crate) fn resolve_character_ids(names: &[String], characters: &[Character]) -> Vec<Uuid> {
    resolve_ids(names, characters.iter().map(|c| (c.name.as_str(), c.id)))
}

fn resolve_ids<'a>(
    names: &[String],
    known: impl Iterator<Item = (&'a str, Uuid)>,
) -> Vec<Uuid> {
    let known: Vec<(&str, Uuid)> = known.collect();
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        match known
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        {
            Some((_, id)) => ids.push(*id),
            None => tracing::warn!(name = %name, "Generated reference to unknown entity, skipping"),
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fabula_core::{Genre, Tone};

    #[test]
    fn ensure_owner_rejects_non_author() {
        let story = Story {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "t".to_string(),
            genre: Genre::Mystery,
            tone: Tone::Dark,
            summary: "s".to_string(),
            moral_framework: "m".to_string(),
            created_at: Utc::now(),
        };
        assert!(ensure_owner(&story, story.author_id).is_ok());
        assert!(ensure_owner(&story, Uuid::new_v4()).is_err());
    }

    #[test]
    fn name_resolution_is_case_insensitive_and_skips_unknown() {
        let id = Uuid::new_v4();
        let names = vec!["The Gate".to_string(), "Nowhere".to_string()];
        let resolved = resolve_ids(&names, [("the gate", id)].into_iter());
        assert_eq!(resolved, vec![id]);
    }
}
