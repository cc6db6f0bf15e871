//! Toonplay: the panel-by-panel script between prose and comic images.

use crate::ShotType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of dialogue within a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DialogueLine {
    /// Speaking character's name
    pub speaker: String,
    /// The spoken line
    pub text: String,
}

/// One panel of a toonplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToonplayPanel {
    /// 1-based panel number
    pub panel_number: u32,
    /// Camera shot type
    pub shot_type: ShotType,
    /// Visual description for the image generator
    pub description: String,
    /// Dialogue lines in this panel
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    /// Narration caption, if any
    #[serde(default)]
    pub narration: Option<String>,
    /// Sound effects
    #[serde(default)]
    pub sfx: Vec<String>,
}

impl ToonplayPanel {
    /// A panel is silent when it carries neither dialogue nor narration.
    ///
    /// The structural quality gate rejects toonplays containing any silent
    /// panel regardless of the LLM-assigned score.
    pub fn is_silent(&self) -> bool {
        self.dialogue.is_empty() && self.narration.as_deref().unwrap_or("").trim().is_empty()
    }
}

/// A complete toonplay for one scene.
///
/// This doubles as the generator's draft type: the provider's JSON is
/// deserialized directly into it, enforcing shot-type vocabulary and panel
/// structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Toonplay {
    /// Title carried over from the scene
    pub title: String,
    /// Ordered panels
    pub panels: Vec<ToonplayPanel>,
}

impl Toonplay {
    /// Number of panels.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Share of panels carrying a narration caption, in [0, 1].
    pub fn narration_ratio(&self) -> f32 {
        if self.panels.is_empty() {
            return 0.0;
        }
        let narrated = self
            .panels
            .iter()
            .filter(|p| p.narration.as_deref().unwrap_or("").trim().len() > 0)
            .count();
        narrated as f32 / self.panels.len() as f32
    }

    /// Share of panels carrying at least one dialogue line, in [0, 1].
    pub fn dialogue_ratio(&self) -> f32 {
        if self.panels.is_empty() {
            return 0.0;
        }
        let with_dialogue = self.panels.iter().filter(|p| !p.dialogue.is_empty()).count();
        with_dialogue as f32 / self.panels.len() as f32
    }

    /// Number of distinct shot types used.
    pub fn distinct_shot_types(&self) -> usize {
        let mut shots: Vec<ShotType> = self.panels.iter().map(|p| p.shot_type).collect();
        shots.sort_by_key(|s| *s as u8);
        shots.dedup();
        shots.len()
    }

    /// Whether at least one special shot appears.
    pub fn has_special_shot(&self) -> bool {
        self.panels.iter().any(|p| p.shot_type.is_special())
    }

    /// Panel numbers of silent panels (no dialogue, no narration).
    pub fn silent_panels(&self) -> Vec<u32> {
        self.panels
            .iter()
            .filter(|p| p.is_silent())
            .map(|p| p.panel_number)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(n: u32, shot: ShotType, dialogue: bool, narration: Option<&str>) -> ToonplayPanel {
        ToonplayPanel {
            panel_number: n,
            shot_type: shot,
            description: format!("panel {n}"),
            dialogue: if dialogue {
                vec![DialogueLine {
                    speaker: "Mira".to_string(),
                    text: "We go at dawn.".to_string(),
                }]
            } else {
                Vec::new()
            },
            narration: narration.map(String::from),
            sfx: Vec::new(),
        }
    }

    #[test]
    fn silent_panel_detection() {
        assert!(panel(1, ShotType::Wide, false, None).is_silent());
        assert!(panel(1, ShotType::Wide, false, Some("  ")).is_silent());
        assert!(!panel(1, ShotType::Wide, true, None).is_silent());
        assert!(!panel(1, ShotType::Wide, false, Some("Dawn broke.")).is_silent());
    }

    #[test]
    fn ratios_and_shot_variety() {
        let toonplay = Toonplay {
            title: "The Crossing".to_string(),
            panels: vec![
                panel(1, ShotType::Wide, true, Some("Dawn.")),
                panel(2, ShotType::Medium, true, None),
                panel(3, ShotType::CloseUp, true, None),
                panel(4, ShotType::Pov, false, Some("The river waited.")),
            ],
        };
        assert_eq!(toonplay.panel_count(), 4);
        assert!((toonplay.narration_ratio() - 0.5).abs() < f32::EPSILON);
        assert!((toonplay.dialogue_ratio() - 0.75).abs() < f32::EPSILON);
        assert_eq!(toonplay.distinct_shot_types(), 4);
        assert!(toonplay.has_special_shot());
        assert!(toonplay.silent_panels().is_empty());
    }
}
