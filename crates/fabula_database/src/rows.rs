//! Row structs mirroring the table definitions.
//!
//! Field order matches column order in `schema.rs`; Diesel's `Queryable`
//! derive is positional.

use crate::schema::{chapters, characters, comic_panels, parts, scenes, settings, stories};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = stories)]
pub struct StoryRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub genre: String,
    pub tone: String,
    pub summary: String,
    pub moral_framework: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = characters)]
pub struct CharacterRow {
    pub id: Uuid,
    pub story_id: Uuid,
    pub name: String,
    pub role: String,
    pub core_trait: String,
    pub personality: serde_json::Value,
    pub appearance: serde_json::Value,
    pub voice: serde_json::Value,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = settings)]
pub struct SettingRow {
    pub id: Uuid,
    pub story_id: Uuid,
    pub name: String,
    pub description: String,
    pub mood: serde_json::Value,
    pub sensory: serde_json::Value,
    pub symbolism: serde_json::Value,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = parts)]
pub struct PartRow {
    pub id: Uuid,
    pub story_id: Uuid,
    pub title: String,
    pub summary: String,
    pub character_arcs: serde_json::Value,
    pub setting_ids: Vec<Uuid>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = chapters)]
pub struct ChapterRow {
    pub id: Uuid,
    pub part_id: Uuid,
    pub title: String,
    pub summary: String,
    pub arc_position: String,
    pub adversity_type: String,
    pub virtue_type: String,
    pub seeds_planted: Vec<String>,
    pub seeds_resolved: Vec<String>,
    pub focus_character_ids: Vec<Uuid>,
    pub setting_ids: Vec<Uuid>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = scenes)]
pub struct SceneRow {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub summary: String,
    pub cycle_phase: String,
    pub emotional_beat: String,
    pub sensory_anchors: Vec<String>,
    pub content: Option<String>,
    pub word_count: Option<i32>,
    pub panel_count: Option<i32>,
    pub toonplay: Option<serde_json::Value>,
    pub publish_status: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = comic_panels)]
pub struct ComicPanelRow {
    pub id: Uuid,
    pub scene_id: Uuid,
    pub panel_number: i32,
    pub shot_type: String,
    pub description: String,
    pub dialogue: Vec<String>,
    pub narration: Vec<String>,
    pub sfx: Vec<String>,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}
