//! Closed vocabularies shared between generation-time and persistence-time
//! validation.
//!
//! Every enum here is serialized with kebab-case wire names. The same types
//! back the provider output schemas (via `schemars`) and the database
//! conversion layer, so an out-of-vocabulary value is rejected at both
//! boundaries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Story genre.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Genre {
    /// Fantasy
    Fantasy,
    /// Science fiction
    ScienceFiction,
    /// Mystery
    Mystery,
    /// Romance
    Romance,
    /// Thriller
    Thriller,
    /// Historical fiction
    Historical,
    /// Literary fiction
    Literary,
    /// Horror
    Horror,
    /// Slice of life
    SliceOfLife,
    /// Adventure
    Adventure,
}

/// Narrative tone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Tone {
    /// Hopeful, uplifting
    Hopeful,
    /// Dark, heavy
    Dark,
    /// Bittersweet
    Bittersweet,
    /// Whimsical, playful
    Whimsical,
    /// Suspenseful
    Suspenseful,
    /// Melancholic
    Melancholic,
    /// Earnest
    Earnest,
}

/// A character's defining virtue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CoreTrait {
    /// Courage in the face of adversity
    Courage,
    /// Compassion toward others
    Compassion,
    /// Honesty at personal cost
    Honesty,
    /// Perseverance through failure
    Perseverance,
    /// Humility despite ability
    Humility,
    /// Loyalty under strain
    Loyalty,
    /// Wisdom over impulse
    Wisdom,
    /// Justice against convenience
    Justice,
}

/// Role a character plays in the story.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CharacterRole {
    /// The protagonist; conventionally index 0 of a character batch
    Protagonist,
    /// Primary opposition
    Antagonist,
    /// Close ally of the protagonist
    Ally,
    /// Mentor figure
    Mentor,
    /// Foil highlighting the protagonist's traits
    Foil,
    /// Supporting cast
    Supporting,
}

/// Position of a chapter within its part's dramatic arc.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ArcPosition {
    /// Opening movement; the persistence-time default when a generator
    /// leaves the field empty
    #[default]
    Beginning,
    /// Rising action
    Middle,
    /// Peak confrontation
    Climax,
    /// Falling action and payoff
    Resolution,
}

/// Kind of adversity a chapter confronts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdversityType {
    /// External obstacle (nature, institutions, circumstance)
    External,
    /// Another person working against the character
    Interpersonal,
    /// The character's own flaws or fears
    Internal,
    /// Moral dilemma with no clean answer
    Moral,
    /// Loss or grief
    Loss,
}

/// Virtue demonstrated in response to adversity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VirtueType {
    /// Acting despite fear
    Bravery,
    /// Choosing kindness when it costs
    Kindness,
    /// Telling the truth
    Truthfulness,
    /// Refusing to give up
    Persistence,
    /// Sacrificing for another
    Sacrifice,
    /// Extending forgiveness
    Forgiveness,
}

/// Phase of the five-phase adversity-triumph cycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CyclePhase {
    /// Establish the ordinary and the stakes
    Setup,
    /// Adversity lands
    Confrontation,
    /// The character's virtue answers
    Virtue,
    /// The cost or reward arrives
    Consequence,
    /// Bridge toward the next cycle
    Transition,
}

/// Dominant emotional beat of a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EmotionalBeat {
    /// Quiet before the storm
    Calm,
    /// Mounting unease
    Tension,
    /// Open conflict
    Conflict,
    /// Despair at the low point
    Despair,
    /// Resolve hardening
    Resolve,
    /// Triumph, earned
    Triumph,
    /// Release and reflection
    Relief,
    /// Grief
    Grief,
    /// Wonder
    Wonder,
}

/// Camera shot type for a comic panel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ShotType {
    /// Wide establishing shot
    Wide,
    /// Medium shot
    Medium,
    /// Close-up
    CloseUp,
    /// Extreme close-up
    ExtremeCloseUp,
    /// Over-the-shoulder
    OverShoulder,
    /// Point-of-view
    Pov,
    /// Bird's-eye view
    BirdEye,
    /// Dutch angle
    DutchAngle,
}

impl ShotType {
    /// Whether this is a "special" shot for the purposes of the toonplay
    /// structural quality gate.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            ShotType::ExtremeCloseUp | ShotType::Pov | ShotType::BirdEye | ShotType::DutchAngle
        )
    }
}

/// Publish status of a scene's comic adaptation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PublishStatus {
    /// Not yet adapted or adaptation in progress
    #[default]
    Draft,
    /// Toonplay accepted, panels generated
    Ready,
    /// Published
    Published,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wire_names_are_kebab_case() {
        let json = serde_json::to_string(&CyclePhase::Confrontation).unwrap();
        assert_eq!(json, "\"confrontation\"");
        let json = serde_json::to_string(&ShotType::ExtremeCloseUp).unwrap();
        assert_eq!(json, "\"extreme-close-up\"");
    }

    #[test]
    fn serde_and_strum_agree() {
        let via_strum = ShotType::from_str("over-shoulder").unwrap();
        let via_serde: ShotType = serde_json::from_str("\"over-shoulder\"").unwrap();
        assert_eq!(via_strum, via_serde);
    }

    #[test]
    fn out_of_vocabulary_values_are_rejected() {
        let result: Result<Genre, _> = serde_json::from_str("\"cyberpunk-noir\"");
        assert!(result.is_err());
    }

    #[test]
    fn special_shots() {
        assert!(ShotType::Pov.is_special());
        assert!(ShotType::DutchAngle.is_special());
        assert!(!ShotType::Wide.is_special());
        assert!(!ShotType::Medium.is_special());
    }

    #[test]
    fn arc_position_defaults_to_beginning() {
        assert_eq!(ArcPosition::default(), ArcPosition::Beginning);
    }
}
