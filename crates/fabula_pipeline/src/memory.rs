//! In-memory [`NovelRepository`] for tests and database-free runs.

use async_trait::async_trait;
use chrono::Utc;
use fabula_core::{
    Chapter, Character, ComicPanel, NewChapter, NewCharacter, NewComicPanel, NewPart, NewScene,
    NewSetting, NewStory, Part, PublishStatus, Scene, Setting, Story, Toonplay,
};
use fabula_error::{AccessError, FabulaResult, JsonError};
use fabula_interface::NovelRepository;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    stories: HashMap<Uuid, Story>,
    characters: Vec<Character>,
    settings: Vec<Setting>,
    parts: Vec<Part>,
    chapters: Vec<Chapter>,
    scenes: Vec<Scene>,
    panels: Vec<ComicPanel>,
}

/// Map-backed repository with the same contract as the Postgres one.
#[derive(Default)]
pub struct MemoryNovelRepository {
    store: Mutex<Store>,
}

impl MemoryNovelRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NovelRepository for MemoryNovelRepository {
    async fn insert_story(&self, new: NewStory) -> FabulaResult<Story> {
        let story = Story {
            id: Uuid::new_v4(),
            author_id: new.author_id,
            title: new.title,
            genre: new.genre,
            tone: new.tone,
            summary: new.summary,
            moral_framework: new.moral_framework,
            created_at: Utc::now(),
        };
        self.store.lock().await.stories.insert(story.id, story.clone());
        Ok(story)
    }

    async fn get_story(&self, id: Uuid) -> FabulaResult<Option<Story>> {
        Ok(self.store.lock().await.stories.get(&id).cloned())
    }

    async fn insert_character(&self, new: NewCharacter) -> FabulaResult<Character> {
        let character = Character {
            id: Uuid::new_v4(),
            story_id: new.story_id,
            name: new.name,
            role: new.role,
            core_trait: new.core_trait,
            personality: new.personality,
            appearance: new.appearance,
            voice: new.voice,
            order_index: new.order_index,
            created_at: Utc::now(),
        };
        self.store.lock().await.characters.push(character.clone());
        Ok(character)
    }

    async fn list_characters(&self, story_id: Uuid) -> FabulaResult<Vec<Character>> {
        let mut rows: Vec<Character> = self
            .store
            .lock()
            .await
            .characters
            .iter()
            .filter(|c| c.story_id == story_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.order_index);
        Ok(rows)
    }

    async fn insert_setting(&self, new: NewSetting) -> FabulaResult<Setting> {
        let setting = Setting {
            id: Uuid::new_v4(),
            story_id: new.story_id,
            name: new.name,
            description: new.description,
            mood: new.mood,
            sensory: new.sensory,
            symbolism: new.symbolism,
            order_index: new.order_index,
            created_at: Utc::now(),
        };
        self.store.lock().await.settings.push(setting.clone());
        Ok(setting)
    }

    async fn list_settings(&self, story_id: Uuid) -> FabulaResult<Vec<Setting>> {
        let mut rows: Vec<Setting> = self
            .store
            .lock()
            .await
            .settings
            .iter()
            .filter(|s| s.story_id == story_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.order_index);
        Ok(rows)
    }

    async fn insert_part(&self, new: NewPart) -> FabulaResult<Part> {
        let part = Part {
            id: Uuid::new_v4(),
            story_id: new.story_id,
            title: new.title,
            summary: new.summary,
            character_arcs: new.character_arcs,
            setting_ids: new.setting_ids,
            order_index: new.order_index,
            created_at: Utc::now(),
        };
        self.store.lock().await.parts.push(part.clone());
        Ok(part)
    }

    async fn list_parts(&self, story_id: Uuid) -> FabulaResult<Vec<Part>> {
        let mut rows: Vec<Part> = self
            .store
            .lock()
            .await
            .parts
            .iter()
            .filter(|p| p.story_id == story_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.order_index);
        Ok(rows)
    }

    async fn get_part(&self, id: Uuid) -> FabulaResult<Option<Part>> {
        Ok(self
            .store
            .lock()
            .await
            .parts
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert_chapter(&self, new: NewChapter) -> FabulaResult<Chapter> {
        let chapter = Chapter {
            id: Uuid::new_v4(),
            part_id: new.part_id,
            title: new.title,
            summary: new.summary,
            arc_position: new.arc_position,
            adversity_type: new.adversity_type,
            virtue_type: new.virtue_type,
            seeds_planted: new.seeds_planted,
            seeds_resolved: new.seeds_resolved,
            focus_character_ids: new.focus_character_ids,
            setting_ids: new.setting_ids,
            order_index: new.order_index,
            created_at: Utc::now(),
        };
        self.store.lock().await.chapters.push(chapter.clone());
        Ok(chapter)
    }

    async fn list_chapters(&self, part_id: Uuid) -> FabulaResult<Vec<Chapter>> {
        let mut rows: Vec<Chapter> = self
            .store
            .lock()
            .await
            .chapters
            .iter()
            .filter(|c| c.part_id == part_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.order_index);
        Ok(rows)
    }

    async fn get_chapter(&self, id: Uuid) -> FabulaResult<Option<Chapter>> {
        Ok(self
            .store
            .lock()
            .await
            .chapters
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_scene(&self, new: NewScene) -> FabulaResult<Scene> {
        let scene = Scene {
            id: Uuid::new_v4(),
            chapter_id: new.chapter_id,
            title: new.title,
            summary: new.summary,
            cycle_phase: new.cycle_phase,
            emotional_beat: new.emotional_beat,
            sensory_anchors: new.sensory_anchors,
            content: None,
            word_count: None,
            panel_count: None,
            toonplay: None,
            publish_status: PublishStatus::Draft,
            order_index: new.order_index,
            created_at: Utc::now(),
        };
        self.store.lock().await.scenes.push(scene.clone());
        Ok(scene)
    }

    async fn list_scenes(&self, chapter_id: Uuid) -> FabulaResult<Vec<Scene>> {
        let mut rows: Vec<Scene> = self
            .store
            .lock()
            .await
            .scenes
            .iter()
            .filter(|s| s.chapter_id == chapter_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.order_index);
        Ok(rows)
    }

    async fn get_scene(&self, id: Uuid) -> FabulaResult<Option<Scene>> {
        Ok(self
            .store
            .lock()
            .await
            .scenes
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn update_scene_content(
        &self,
        scene_id: Uuid,
        content: &str,
        word_count: i32,
    ) -> FabulaResult<Scene> {
        let mut store = self.store.lock().await;
        let scene = store
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| AccessError::not_found("scene", scene_id))?;
        scene.content = Some(content.to_string());
        scene.word_count = Some(word_count);
        Ok(scene.clone())
    }

    async fn update_scene_toonplay(
        &self,
        scene_id: Uuid,
        toonplay: &Toonplay,
        panel_count: i32,
    ) -> FabulaResult<Scene> {
        let blob = serde_json::to_value(toonplay).map_err(|e| JsonError::new(e.to_string()))?;
        let mut store = self.store.lock().await;
        let scene = store
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| AccessError::not_found("scene", scene_id))?;
        scene.toonplay = Some(blob);
        scene.panel_count = Some(panel_count);
        Ok(scene.clone())
    }

    async fn update_scene_publish_status(
        &self,
        scene_id: Uuid,
        status: PublishStatus,
    ) -> FabulaResult<Scene> {
        let mut store = self.store.lock().await;
        let scene = store
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| AccessError::not_found("scene", scene_id))?;
        scene.publish_status = status;
        Ok(scene.clone())
    }

    async fn insert_panel(&self, new: NewComicPanel) -> FabulaResult<ComicPanel> {
        let panel = ComicPanel {
            id: Uuid::new_v4(),
            scene_id: new.scene_id,
            panel_number: new.panel_number,
            shot_type: new.shot_type,
            description: new.description,
            dialogue: new.dialogue,
            narration: new.narration,
            sfx: new.sfx,
            image_key: None,
            created_at: Utc::now(),
        };
        self.store.lock().await.panels.push(panel.clone());
        Ok(panel)
    }

    async fn list_panels(&self, scene_id: Uuid) -> FabulaResult<Vec<ComicPanel>> {
        let mut rows: Vec<ComicPanel> = self
            .store
            .lock()
            .await
            .panels
            .iter()
            .filter(|p| p.scene_id == scene_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.panel_number);
        Ok(rows)
    }

    async fn set_panel_image(&self, panel_id: Uuid, image_key: &str) -> FabulaResult<ComicPanel> {
        let mut store = self.store.lock().await;
        let panel = store
            .panels
            .iter_mut()
            .find(|p| p.id == panel_id)
            .ok_or_else(|| AccessError::not_found("panel", panel_id))?;
        panel.image_key = Some(image_key.to_string());
        Ok(panel.clone())
    }
}
