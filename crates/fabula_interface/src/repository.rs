//! Persistence seam for the narrative entity hierarchy.
//!
//! The pipeline talks to storage exclusively through [`NovelRepository`], so
//! services and the orchestrator can run against Postgres in production and
//! an in-memory map in tests.

use async_trait::async_trait;
use fabula_core::{
    Chapter, Character, ComicPanel, NewChapter, NewCharacter, NewComicPanel, NewPart, NewScene,
    NewSetting, NewStory, Part, PublishStatus, Scene, Setting, Story, Toonplay,
};
use fabula_error::FabulaResult;
use uuid::Uuid;

/// Storage backend for stories and everything under them.
///
/// Insert methods return the persisted row so callers always hand back
/// database truth (assigned ids, timestamps), never an echo of their input.
/// Update methods return `AccessError::NotFound` when the target row is gone.
#[async_trait]
pub trait NovelRepository: Send + Sync {
    /// Insert a story and return the persisted row.
    async fn insert_story(&self, new: NewStory) -> FabulaResult<Story>;

    /// Fetch a story by id.
    async fn get_story(&self, id: Uuid) -> FabulaResult<Option<Story>>;

    /// Insert a character and return the persisted row.
    async fn insert_character(&self, new: NewCharacter) -> FabulaResult<Character>;

    /// List a story's characters ordered by `order_index`.
    async fn list_characters(&self, story_id: Uuid) -> FabulaResult<Vec<Character>>;

    /// Insert a setting and return the persisted row.
    async fn insert_setting(&self, new: NewSetting) -> FabulaResult<Setting>;

    /// List a story's settings ordered by `order_index`.
    async fn list_settings(&self, story_id: Uuid) -> FabulaResult<Vec<Setting>>;

    /// Insert a part and return the persisted row.
    async fn insert_part(&self, new: NewPart) -> FabulaResult<Part>;

    /// List a story's parts ordered by `order_index`.
    async fn list_parts(&self, story_id: Uuid) -> FabulaResult<Vec<Part>>;

    /// Fetch a part by id.
    async fn get_part(&self, id: Uuid) -> FabulaResult<Option<Part>>;

    /// Insert a chapter and return the persisted row.
    async fn insert_chapter(&self, new: NewChapter) -> FabulaResult<Chapter>;

    /// List a part's chapters ordered by `order_index`.
    async fn list_chapters(&self, part_id: Uuid) -> FabulaResult<Vec<Chapter>>;

    /// Fetch a chapter by id.
    async fn get_chapter(&self, id: Uuid) -> FabulaResult<Option<Chapter>>;

    /// Insert a scene and return the persisted row.
    async fn insert_scene(&self, new: NewScene) -> FabulaResult<Scene>;

    /// List a chapter's scenes ordered by `order_index`.
    async fn list_scenes(&self, chapter_id: Uuid) -> FabulaResult<Vec<Scene>>;

    /// Fetch a scene by id.
    async fn get_scene(&self, id: Uuid) -> FabulaResult<Option<Scene>>;

    /// Attach prose content to a scene.
    async fn update_scene_content(
        &self,
        scene_id: Uuid,
        content: &str,
        word_count: i32,
    ) -> FabulaResult<Scene>;

    /// Attach a toonplay adaptation to a scene.
    async fn update_scene_toonplay(
        &self,
        scene_id: Uuid,
        toonplay: &Toonplay,
        panel_count: i32,
    ) -> FabulaResult<Scene>;

    /// Move a scene through the publishing lifecycle.
    async fn update_scene_publish_status(
        &self,
        scene_id: Uuid,
        status: PublishStatus,
    ) -> FabulaResult<Scene>;

    /// Insert a comic panel and return the persisted row.
    async fn insert_panel(&self, new: NewComicPanel) -> FabulaResult<ComicPanel>;

    /// List a scene's panels ordered by `panel_number`.
    async fn list_panels(&self, scene_id: Uuid) -> FabulaResult<Vec<ComicPanel>>;

    /// Record the storage key of a panel's rendered image.
    async fn set_panel_image(&self, panel_id: Uuid, image_key: &str) -> FabulaResult<ComicPanel>;
}
