//! Creation payloads: validated entity data ready for insertion.
//!
//! These are the shapes persistence services hand to a repository after
//! draft validation and default-filling. Database-assigned fields (ids,
//! timestamps) are absent; the returned entity is the post-insert truth.

use crate::{
    AdversityType, Appearance, ArcPosition, CharacterArc, CharacterRole, CoreTrait, CyclePhase,
    EmotionalBeat, Genre, Mood, Personality, Sensory, ShotType, Symbolism, Tone, VirtueType, Voice,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for inserting a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStory {
    /// Owning user
    pub author_id: Uuid,
    /// Story title
    pub title: String,
    /// Genre
    pub genre: Genre,
    /// Tone
    pub tone: Tone,
    /// One-paragraph summary
    pub summary: String,
    /// Moral framework
    pub moral_framework: String,
}

/// Payload for inserting a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCharacter {
    /// Owning story
    pub story_id: Uuid,
    /// Character name
    pub name: String,
    /// Narrative role
    pub role: CharacterRole,
    /// Defining virtue
    pub core_trait: CoreTrait,
    /// Personality profile
    pub personality: Personality,
    /// Physical appearance
    pub appearance: Appearance,
    /// Speaking voice
    pub voice: Voice,
    /// Position within the batch
    pub order_index: i32,
}

/// Payload for inserting a setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSetting {
    /// Owning story
    pub story_id: Uuid,
    /// Setting name
    pub name: String,
    /// Prose description
    pub description: String,
    /// Emotional atmosphere
    pub mood: Mood,
    /// Sensory texture
    pub sensory: Sensory,
    /// Symbolic weight
    pub symbolism: Symbolism,
    /// Position within the batch
    pub order_index: i32,
}

/// Payload for inserting a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPart {
    /// Owning story
    pub story_id: Uuid,
    /// Part title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Per-character arcs
    pub character_arcs: Vec<CharacterArc>,
    /// Resolved setting ids
    pub setting_ids: Vec<Uuid>,
    /// Position within the story
    pub order_index: i32,
}

/// Payload for inserting a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChapter {
    /// Owning part
    pub part_id: Uuid,
    /// Chapter title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Arc position (default-filled when the generator left it empty)
    pub arc_position: ArcPosition,
    /// Adversity kind
    pub adversity_type: AdversityType,
    /// Virtue kind
    pub virtue_type: VirtueType,
    /// Seeds planted
    pub seeds_planted: Vec<String>,
    /// Seeds resolved
    pub seeds_resolved: Vec<String>,
    /// Resolved focus character ids
    pub focus_character_ids: Vec<Uuid>,
    /// Resolved setting ids
    pub setting_ids: Vec<Uuid>,
    /// Position within the part
    pub order_index: i32,
}

/// Payload for inserting a scene (summary phase; prose arrives later).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScene {
    /// Owning chapter
    pub chapter_id: Uuid,
    /// Scene title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Cycle phase
    pub cycle_phase: CyclePhase,
    /// Emotional beat
    pub emotional_beat: EmotionalBeat,
    /// Sensory anchors
    pub sensory_anchors: Vec<String>,
    /// Position within the chapter
    pub order_index: i32,
}

/// Payload for inserting a comic panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComicPanel {
    /// Owning scene
    pub scene_id: Uuid,
    /// 1-based panel number
    pub panel_number: i32,
    /// Camera shot type
    pub shot_type: ShotType,
    /// Visual description
    pub description: String,
    /// Dialogue lines, rendered as "speaker: text"
    pub dialogue: Vec<String>,
    /// Narration captions
    pub narration: Vec<String>,
    /// Sound effects
    pub sfx: Vec<String>,
}
