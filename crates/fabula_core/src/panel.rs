//! Comic panel entity.

use crate::ShotType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted comic panel, derived from one toonplay panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicPanel {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning scene
    pub scene_id: Uuid,
    /// 1-based panel number within the scene
    pub panel_number: i32,
    /// Camera shot type
    pub shot_type: ShotType,
    /// Visual description used as the image prompt
    pub description: String,
    /// Dialogue lines, rendered as "speaker: text"
    pub dialogue: Vec<String>,
    /// Narration captions
    pub narration: Vec<String>,
    /// Sound effects
    pub sfx: Vec<String>,
    /// Blob storage key of the generated image, once the image phase has run
    pub image_key: Option<String>,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}
