//! PostgreSQL implementation of [`NovelRepository`].

use crate::conversions::{
    chapter_from_row, character_from_row, new_chapter_row, new_character_row, new_panel_row,
    new_part_row, new_scene_row, new_setting_row, new_story_row, panel_from_row, part_from_row,
    scene_from_row, setting_from_row, story_from_row,
};
use crate::rows::{
    ChapterRow, CharacterRow, ComicPanelRow, PartRow, SceneRow, SettingRow, StoryRow,
};
use crate::schema::{chapters, characters, comic_panels, parts, scenes, settings, stories};

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use fabula_core::{
    Chapter, Character, ComicPanel, NewChapter, NewCharacter, NewComicPanel, NewPart, NewScene,
    NewSetting, NewStory, Part, PublishStatus, Scene, Setting, Story, Toonplay,
};
use fabula_error::{AccessError, DatabaseError, DatabaseErrorKind, FabulaError, FabulaResult};
use fabula_interface::NovelRepository;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Connect to PostgreSQL using the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns `DatabaseErrorKind::Connection` when the variable is unset or the
/// connection attempt fails.
pub fn establish_connection() -> FabulaResult<PgConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    Ok(PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?)
}

/// PostgreSQL-backed repository for the novel hierarchy.
///
/// The connection is wrapped in `Arc<Mutex>` for async access; writes within
/// a single method hold the lock for the duration of the query. Batch phases
/// deliberately insert row by row so a failure partway through leaves earlier
/// rows persisted (best-effort batches, reported via `BatchAborted`).
pub struct PostgresNovelRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresNovelRepository {
    /// Create a repository owning its connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

fn update_error(e: diesel::result::Error, entity: &'static str, id: Uuid) -> FabulaError {
    match e {
        diesel::result::Error::NotFound => AccessError::not_found(entity, id).into(),
        other => DatabaseError::from(other).into(),
    }
}

#[async_trait]
impl NovelRepository for PostgresNovelRepository {
    async fn insert_story(&self, new: NewStory) -> FabulaResult<Story> {
        let mut conn = self.conn.lock().await;
        let row: StoryRow = diesel::insert_into(stories::table)
            .values(new_story_row(new))
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        story_from_row(row)
    }

    async fn get_story(&self, id: Uuid) -> FabulaResult<Option<Story>> {
        let mut conn = self.conn.lock().await;
        let row: Option<StoryRow> = stories::table
            .find(id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;
        row.map(story_from_row).transpose()
    }

    async fn insert_character(&self, new: NewCharacter) -> FabulaResult<Character> {
        let row = new_character_row(new)?;
        let mut conn = self.conn.lock().await;
        let row: CharacterRow = diesel::insert_into(characters::table)
            .values(row)
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        character_from_row(row)
    }

    async fn list_characters(&self, story_id: Uuid) -> FabulaResult<Vec<Character>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<CharacterRow> = characters::table
            .filter(characters::story_id.eq(story_id))
            .order(characters::order_index.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(character_from_row).collect()
    }

    async fn insert_setting(&self, new: NewSetting) -> FabulaResult<Setting> {
        let row = new_setting_row(new)?;
        let mut conn = self.conn.lock().await;
        let row: SettingRow = diesel::insert_into(settings::table)
            .values(row)
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        setting_from_row(row)
    }

    async fn list_settings(&self, story_id: Uuid) -> FabulaResult<Vec<Setting>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<SettingRow> = settings::table
            .filter(settings::story_id.eq(story_id))
            .order(settings::order_index.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(setting_from_row).collect()
    }

    async fn insert_part(&self, new: NewPart) -> FabulaResult<Part> {
        let row = new_part_row(new)?;
        let mut conn = self.conn.lock().await;
        let row: PartRow = diesel::insert_into(parts::table)
            .values(row)
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        part_from_row(row)
    }

    async fn list_parts(&self, story_id: Uuid) -> FabulaResult<Vec<Part>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<PartRow> = parts::table
            .filter(parts::story_id.eq(story_id))
            .order(parts::order_index.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(part_from_row).collect()
    }

    async fn get_part(&self, id: Uuid) -> FabulaResult<Option<Part>> {
        let mut conn = self.conn.lock().await;
        let row: Option<PartRow> = parts::table
            .find(id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;
        row.map(part_from_row).transpose()
    }

    async fn insert_chapter(&self, new: NewChapter) -> FabulaResult<Chapter> {
        let mut conn = self.conn.lock().await;
        let row: ChapterRow = diesel::insert_into(chapters::table)
            .values(new_chapter_row(new))
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        chapter_from_row(row)
    }

    async fn list_chapters(&self, part_id: Uuid) -> FabulaResult<Vec<Chapter>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<ChapterRow> = chapters::table
            .filter(chapters::part_id.eq(part_id))
            .order(chapters::order_index.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(chapter_from_row).collect()
    }

    async fn get_chapter(&self, id: Uuid) -> FabulaResult<Option<Chapter>> {
        let mut conn = self.conn.lock().await;
        let row: Option<ChapterRow> = chapters::table
            .find(id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;
        row.map(chapter_from_row).transpose()
    }

    async fn insert_scene(&self, new: NewScene) -> FabulaResult<Scene> {
        let mut conn = self.conn.lock().await;
        let row: SceneRow = diesel::insert_into(scenes::table)
            .values(new_scene_row(new))
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        scene_from_row(row)
    }

    async fn list_scenes(&self, chapter_id: Uuid) -> FabulaResult<Vec<Scene>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<SceneRow> = scenes::table
            .filter(scenes::chapter_id.eq(chapter_id))
            .order(scenes::order_index.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(scene_from_row).collect()
    }

    async fn get_scene(&self, id: Uuid) -> FabulaResult<Option<Scene>> {
        let mut conn = self.conn.lock().await;
        let row: Option<SceneRow> = scenes::table
            .find(id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;
        row.map(scene_from_row).transpose()
    }

    async fn update_scene_content(
        &self,
        scene_id: Uuid,
        content: &str,
        word_count: i32,
    ) -> FabulaResult<Scene> {
        let mut conn = self.conn.lock().await;
        let row: SceneRow = diesel::update(scenes::table.find(scene_id))
            .set((
                scenes::content.eq(content),
                scenes::word_count.eq(word_count),
            ))
            .get_result(&mut *conn)
            .map_err(|e| update_error(e, "scene", scene_id))?;
        scene_from_row(row)
    }

    async fn update_scene_toonplay(
        &self,
        scene_id: Uuid,
        toonplay: &Toonplay,
        panel_count: i32,
    ) -> FabulaResult<Scene> {
        let blob = serde_json::to_value(toonplay).map_err(DatabaseError::from)?;
        let mut conn = self.conn.lock().await;
        let row: SceneRow = diesel::update(scenes::table.find(scene_id))
            .set((
                scenes::toonplay.eq(blob),
                scenes::panel_count.eq(panel_count),
            ))
            .get_result(&mut *conn)
            .map_err(|e| update_error(e, "scene", scene_id))?;
        scene_from_row(row)
    }

    async fn update_scene_publish_status(
        &self,
        scene_id: Uuid,
        status: PublishStatus,
    ) -> FabulaResult<Scene> {
        let mut conn = self.conn.lock().await;
        let row: SceneRow = diesel::update(scenes::table.find(scene_id))
            .set(scenes::publish_status.eq(status.to_string()))
            .get_result(&mut *conn)
            .map_err(|e| update_error(e, "scene", scene_id))?;
        scene_from_row(row)
    }

    async fn insert_panel(&self, new: NewComicPanel) -> FabulaResult<ComicPanel> {
        let mut conn = self.conn.lock().await;
        let row: ComicPanelRow = diesel::insert_into(comic_panels::table)
            .values(new_panel_row(new))
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;
        panel_from_row(row)
    }

    async fn list_panels(&self, scene_id: Uuid) -> FabulaResult<Vec<ComicPanel>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<ComicPanelRow> = comic_panels::table
            .filter(comic_panels::scene_id.eq(scene_id))
            .order(comic_panels::panel_number.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        rows.into_iter().map(panel_from_row).collect()
    }

    async fn set_panel_image(&self, panel_id: Uuid, image_key: &str) -> FabulaResult<ComicPanel> {
        let mut conn = self.conn.lock().await;
        let row: ComicPanelRow = diesel::update(comic_panels::table.find(panel_id))
            .set(comic_panels::image_key.eq(image_key))
            .get_result(&mut *conn)
            .map_err(|e| update_error(e, "panel", panel_id))?;
        panel_from_row(row)
    }
}
