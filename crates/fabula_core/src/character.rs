//! Character entity, nested value objects, and draft.
//!
//! The nested objects are typed once here and trusted after persistence-time
//! validation; no defensive re-narrowing happens at read sites.

use crate::{CharacterRole, CoreTrait};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Personality profile for a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Personality {
    /// Defining strengths
    pub strengths: Vec<String>,
    /// Flaws that adversity will press on
    pub flaws: Vec<String>,
    /// What the character wants
    pub desires: Vec<String>,
    /// What the character fears
    pub fears: Vec<String>,
}

/// Physical appearance notes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Appearance {
    /// Build, face, bearing
    pub features: Vec<String>,
    /// Clothing and accessories
    pub attire: Vec<String>,
    /// Details an artist should keep consistent across panels
    pub distinguishing_marks: Vec<String>,
}

/// How the character speaks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Voice {
    /// Register and cadence
    pub speech_patterns: Vec<String>,
    /// Words or phrases the character habitually uses
    pub verbal_tics: Vec<String>,
}

/// A persisted character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Database-assigned id
    pub id: Uuid,
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
    /// Position within the story's character batch; the main character is
    /// conventionally index 0
    pub order_index: i32,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CharacterDraft {
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
}
