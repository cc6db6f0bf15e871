//! Row to domain conversions.
//!
//! This is the single point where stored text and Jsonb come back under the
//! closed vocabularies: every enum column is re-parsed and every Jsonb blob
//! is re-deserialized into its typed shape, so a row written by an older or
//! buggy writer fails loudly instead of leaking malformed data downstream.

use crate::rows::{
    ChapterRow, CharacterRow, ComicPanelRow, PartRow, SceneRow, SettingRow, StoryRow,
};
use chrono::Utc;
use fabula_core::{
    Chapter, Character, ComicPanel, NewChapter, NewCharacter, NewComicPanel, NewPart, NewScene,
    NewSetting, NewStory, Part, PublishStatus, Scene, Setting, Story,
};
use fabula_error::{DatabaseError, DatabaseErrorKind, FabulaResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

fn parse_enum<T: std::str::FromStr>(value: &str, column: &'static str) -> FabulaResult<T> {
    value.parse::<T>().map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!(
            "invalid {column} value: {value}"
        )))
        .into()
    })
}

fn from_json<T: DeserializeOwned>(
    value: serde_json::Value,
    column: &'static str,
) -> FabulaResult<T> {
    serde_json::from_value(value).map_err(|e| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!("{column}: {e}"))).into()
    })
}

fn to_json<T: Serialize>(value: &T) -> FabulaResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| DatabaseError::from(e).into())
}

pub fn new_story_row(new: NewStory) -> StoryRow {
    StoryRow {
        id: Uuid::new_v4(),
        author_id: new.author_id,
        title: new.title,
        genre: new.genre.to_string(),
        tone: new.tone.to_string(),
        summary: new.summary,
        moral_framework: new.moral_framework,
        created_at: Utc::now(),
    }
}

pub fn story_from_row(row: StoryRow) -> FabulaResult<Story> {
    Ok(Story {
        id: row.id,
        author_id: row.author_id,
        title: row.title,
        genre: parse_enum(&row.genre, "genre")?,
        tone: parse_enum(&row.tone, "tone")?,
        summary: row.summary,
        moral_framework: row.moral_framework,
        created_at: row.created_at,
    })
}

pub fn new_character_row(new: NewCharacter) -> FabulaResult<CharacterRow> {
    Ok(CharacterRow {
        id: Uuid::new_v4(),
        story_id: new.story_id,
        name: new.name,
        role: new.role.to_string(),
        core_trait: new.core_trait.to_string(),
        personality: to_json(&new.personality)?,
        appearance: to_json(&new.appearance)?,
        voice: to_json(&new.voice)?,
        order_index: new.order_index,
        created_at: Utc::now(),
    })
}

pub fn character_from_row(row: CharacterRow) -> FabulaResult<Character> {
    Ok(Character {
        id: row.id,
        story_id: row.story_id,
        name: row.name,
        role: parse_enum(&row.role, "role")?,
        core_trait: parse_enum(&row.core_trait, "core_trait")?,
        personality: from_json(row.personality, "personality")?,
        appearance: from_json(row.appearance, "appearance")?,
        voice: from_json(row.voice, "voice")?,
        order_index: row.order_index,
        created_at: row.created_at,
    })
}

pub fn new_setting_row(new: NewSetting) -> FabulaResult<SettingRow> {
    Ok(SettingRow {
        id: Uuid::new_v4(),
        story_id: new.story_id,
        name: new.name,
        description: new.description,
        mood: to_json(&new.mood)?,
        sensory: to_json(&new.sensory)?,
        symbolism: to_json(&new.symbolism)?,
        order_index: new.order_index,
        created_at: Utc::now(),
    })
}

pub fn setting_from_row(row: SettingRow) -> FabulaResult<Setting> {
    Ok(Setting {
        id: row.id,
        story_id: row.story_id,
        name: row.name,
        description: row.description,
        mood: from_json(row.mood, "mood")?,
        sensory: from_json(row.sensory, "sensory")?,
        symbolism: from_json(row.symbolism, "symbolism")?,
        order_index: row.order_index,
        created_at: row.created_at,
    })
}

pub fn new_part_row(new: NewPart) -> FabulaResult<PartRow> {
    Ok(PartRow {
        id: Uuid::new_v4(),
        story_id: new.story_id,
        title: new.title,
        summary: new.summary,
        character_arcs: to_json(&new.character_arcs)?,
        setting_ids: new.setting_ids,
        order_index: new.order_index,
        created_at: Utc::now(),
    })
}

pub fn part_from_row(row: PartRow) -> FabulaResult<Part> {
    Ok(Part {
        id: row.id,
        story_id: row.story_id,
        title: row.title,
        summary: row.summary,
        character_arcs: from_json(row.character_arcs, "character_arcs")?,
        setting_ids: row.setting_ids,
        order_index: row.order_index,
        created_at: row.created_at,
    })
}

pub fn new_chapter_row(new: NewChapter) -> ChapterRow {
    ChapterRow {
        id: Uuid::new_v4(),
        part_id: new.part_id,
        title: new.title,
        summary: new.summary,
        arc_position: new.arc_position.to_string(),
        adversity_type: new.adversity_type.to_string(),
        virtue_type: new.virtue_type.to_string(),
        seeds_planted: new.seeds_planted,
        seeds_resolved: new.seeds_resolved,
        focus_character_ids: new.focus_character_ids,
        setting_ids: new.setting_ids,
        order_index: new.order_index,
        created_at: Utc::now(),
    }
}

pub fn chapter_from_row(row: ChapterRow) -> FabulaResult<Chapter> {
    Ok(Chapter {
        id: row.id,
        part_id: row.part_id,
        title: row.title,
        summary: row.summary,
        arc_position: parse_enum(&row.arc_position, "arc_position")?,
        adversity_type: parse_enum(&row.adversity_type, "adversity_type")?,
        virtue_type: parse_enum(&row.virtue_type, "virtue_type")?,
        seeds_planted: row.seeds_planted,
        seeds_resolved: row.seeds_resolved,
        focus_character_ids: row.focus_character_ids,
        setting_ids: row.setting_ids,
        order_index: row.order_index,
        created_at: row.created_at,
    })
}

pub fn new_scene_row(new: NewScene) -> SceneRow {
    SceneRow {
        id: Uuid::new_v4(),
        chapter_id: new.chapter_id,
        title: new.title,
        summary: new.summary,
        cycle_phase: new.cycle_phase.to_string(),
        emotional_beat: new.emotional_beat.to_string(),
        sensory_anchors: new.sensory_anchors,
        content: None,
        word_count: None,
        panel_count: None,
        toonplay: None,
        publish_status: PublishStatus::Draft.to_string(),
        order_index: new.order_index,
        created_at: Utc::now(),
    }
}

pub fn scene_from_row(row: SceneRow) -> FabulaResult<Scene> {
    Ok(Scene {
        id: row.id,
        chapter_id: row.chapter_id,
        title: row.title,
        summary: row.summary,
        cycle_phase: parse_enum(&row.cycle_phase, "cycle_phase")?,
        emotional_beat: parse_enum(&row.emotional_beat, "emotional_beat")?,
        sensory_anchors: row.sensory_anchors,
        content: row.content,
        word_count: row.word_count,
        panel_count: row.panel_count,
        toonplay: row.toonplay,
        publish_status: parse_enum(&row.publish_status, "publish_status")?,
        order_index: row.order_index,
        created_at: row.created_at,
    })
}

pub fn new_panel_row(new: NewComicPanel) -> ComicPanelRow {
    ComicPanelRow {
        id: Uuid::new_v4(),
        scene_id: new.scene_id,
        panel_number: new.panel_number,
        shot_type: new.shot_type.to_string(),
        description: new.description,
        dialogue: new.dialogue,
        narration: new.narration,
        sfx: new.sfx,
        image_key: None,
        created_at: Utc::now(),
    }
}

pub fn panel_from_row(row: ComicPanelRow) -> FabulaResult<ComicPanel> {
    Ok(ComicPanel {
        id: row.id,
        scene_id: row.scene_id,
        panel_number: row.panel_number,
        shot_type: parse_enum(&row.shot_type, "shot_type")?,
        description: row.description,
        dialogue: row.dialogue,
        narration: row.narration,
        sfx: row.sfx,
        image_key: row.image_key,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::{
        Appearance, CharacterRole, CoreTrait, Genre, Personality, Tone, Voice,
    };

    fn sample_character() -> NewCharacter {
        NewCharacter {
            story_id: Uuid::new_v4(),
            name: "Mara".to_string(),
            role: CharacterRole::Protagonist,
            core_trait: CoreTrait::Courage,
            personality: Personality {
                strengths: vec!["steady under pressure".to_string()],
                flaws: vec!["slow to trust".to_string()],
                desires: vec!["to belong".to_string()],
                fears: vec!["abandonment".to_string()],
            },
            appearance: Appearance {
                features: vec!["grey eyes".to_string()],
                attire: vec!["patched coat".to_string()],
                distinguishing_marks: vec![],
            },
            voice: Voice {
                speech_patterns: vec!["clipped sentences".to_string()],
                verbal_tics: vec![],
            },
            order_index: 0,
        }
    }

    #[test]
    fn character_row_roundtrip() {
        let new = sample_character();
        let row = new_character_row(new.clone()).unwrap();
        let character = character_from_row(row).unwrap();
        assert_eq!(character.name, new.name);
        assert_eq!(character.role, new.role);
        assert_eq!(character.personality, new.personality);
    }

    #[test]
    fn story_row_roundtrip_preserves_vocab() {
        let row = new_story_row(NewStory {
            author_id: Uuid::new_v4(),
            title: "The Lantern Road".to_string(),
            genre: Genre::Fantasy,
            tone: Tone::Hopeful,
            summary: "A courier carries light between cities.".to_string(),
            moral_framework: "kindness under scarcity".to_string(),
        });
        assert_eq!(row.genre, "fantasy");
        let story = story_from_row(row).unwrap();
        assert_eq!(story.genre, Genre::Fantasy);
        assert_eq!(story.tone, Tone::Hopeful);
    }

    #[test]
    fn unknown_vocab_text_is_rejected() {
        let mut row = new_story_row(NewStory {
            author_id: Uuid::new_v4(),
            title: "t".to_string(),
            genre: Genre::Mystery,
            tone: Tone::Dark,
            summary: "s".to_string(),
            moral_framework: "m".to_string(),
        });
        row.genre = "space-western".to_string();
        assert!(story_from_row(row).is_err());
    }

    #[test]
    fn new_scene_row_starts_as_draft_without_content() {
        let row = new_scene_row(NewScene {
            chapter_id: Uuid::new_v4(),
            title: "Arrival".to_string(),
            summary: "Mara reaches the gate.".to_string(),
            cycle_phase: fabula_core::CyclePhase::Setup,
            emotional_beat: fabula_core::EmotionalBeat::Tension,
            sensory_anchors: vec!["wet stone".to_string()],
            order_index: 0,
        });
        assert_eq!(row.publish_status, "draft");
        assert!(row.content.is_none());
        assert!(row.toonplay.is_none());
    }
}
