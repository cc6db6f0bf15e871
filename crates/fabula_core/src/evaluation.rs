//! Evaluation rubrics returned by the quality-improvement loops.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest score any rubric category may carry.
pub const SCORE_MIN: f32 = 1.0;
/// Highest score any rubric category may carry.
pub const SCORE_MAX: f32 = 4.0;

fn score_out_of_range(scores: &[(&'static str, f32)]) -> Option<(&'static str, f32)> {
    scores
        .iter()
        .copied()
        .find(|(_, value)| !(SCORE_MIN..=SCORE_MAX).contains(value))
}

/// Rubric for evaluating scene prose.
///
/// Five sub-scores in [1, 4], an overall score assigned by the evaluator,
/// free-text feedback, and concrete improvement suggestions fed to the
/// rewrite step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProseEvaluation {
    /// Does the scene move the chapter forward
    #[schemars(range(min = 1.0, max = 4.0))]
    pub plot_advancement: f32,
    /// Do characters act within their established traits and voice
    #[schemars(range(min = 1.0, max = 4.0))]
    pub character_consistency: f32,
    /// Does the emotional beat land
    #[schemars(range(min = 1.0, max = 4.0))]
    pub emotional_resonance: f32,
    /// Is the prose grounded in the scene's sensory anchors
    #[schemars(range(min = 1.0, max = 4.0))]
    pub sensory_grounding: f32,
    /// Line-level craft
    #[schemars(range(min = 1.0, max = 4.0))]
    pub prose_quality: f32,
    /// Evaluator's overall score
    #[schemars(range(min = 1.0, max = 4.0))]
    pub overall_score: f32,
    /// Free-text feedback
    pub feedback: String,
    /// Concrete suggestions for the rewrite step
    pub suggested_improvements: Vec<String>,
}

impl ProseEvaluation {
    /// First score outside [`SCORE_MIN`, `SCORE_MAX`], with its field name.
    ///
    /// The provider is asked for scores in range via the schema but never
    /// trusted to comply; callers reject evaluations where this returns
    /// `Some` rather than let a fabricated score drive acceptance.
    pub fn score_out_of_range(&self) -> Option<(&'static str, f32)> {
        score_out_of_range(&[
            ("plot_advancement", self.plot_advancement),
            ("character_consistency", self.character_consistency),
            ("emotional_resonance", self.emotional_resonance),
            ("sensory_grounding", self.sensory_grounding),
            ("prose_quality", self.prose_quality),
            ("overall_score", self.overall_score),
        ])
    }
}

/// Weighted four-category rubric for evaluating a toonplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ToonplayEvaluation {
    /// Does the panel sequence tell the story visually (weight 20%)
    #[schemars(range(min = 1.0, max = 4.0))]
    pub visual_storytelling: f32,
    /// Dialogue carries the scene without leaning on narration (weight 30%)
    #[schemars(range(min = 1.0, max = 4.0))]
    pub dialogue_quality: f32,
    /// Panel-to-panel pacing and flow (weight 30%)
    #[schemars(range(min = 1.0, max = 4.0))]
    pub pacing_flow: f32,
    /// Does the scene's emotional beat land in panels (weight 20%)
    #[schemars(range(min = 1.0, max = 4.0))]
    pub emotional_impact: f32,
    /// Free-text feedback
    pub feedback: String,
    /// Concrete suggestions for the rewrite step
    pub suggested_improvements: Vec<String>,
}

impl ToonplayEvaluation {
    /// Weighted overall score: 20/30/30/20 across the four categories.
    pub fn weighted_score(&self) -> f32 {
        0.2 * self.visual_storytelling
            + 0.3 * self.dialogue_quality
            + 0.3 * self.pacing_flow
            + 0.2 * self.emotional_impact
    }

    /// First score outside [`SCORE_MIN`, `SCORE_MAX`], with its field name.
    pub fn score_out_of_range(&self) -> Option<(&'static str, f32)> {
        score_out_of_range(&[
            ("visual_storytelling", self.visual_storytelling),
            ("dialogue_quality", self.dialogue_quality),
            ("pacing_flow", self.pacing_flow),
            ("emotional_impact", self.emotional_impact),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_score_uses_category_weights() {
        let eval = ToonplayEvaluation {
            visual_storytelling: 4.0,
            dialogue_quality: 2.0,
            pacing_flow: 3.0,
            emotional_impact: 1.0,
            feedback: String::new(),
            suggested_improvements: Vec::new(),
        };
        // 0.2*4 + 0.3*2 + 0.3*3 + 0.2*1 = 2.5
        assert!((eval.weighted_score() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn in_range_scores_pass_the_range_check() {
        let eval = ProseEvaluation {
            plot_advancement: 1.0,
            character_consistency: 4.0,
            emotional_resonance: 2.5,
            sensory_grounding: 3.0,
            prose_quality: 3.9,
            overall_score: 3.0,
            feedback: String::new(),
            suggested_improvements: Vec::new(),
        };
        assert_eq!(eval.score_out_of_range(), None);
    }

    #[test]
    fn out_of_range_score_is_reported_with_its_field() {
        let eval = ProseEvaluation {
            plot_advancement: 3.0,
            character_consistency: 3.0,
            emotional_resonance: 9.9,
            sensory_grounding: 3.0,
            prose_quality: 3.0,
            overall_score: 3.0,
            feedback: String::new(),
            suggested_improvements: Vec::new(),
        };
        assert_eq!(eval.score_out_of_range(), Some(("emotional_resonance", 9.9)));

        let eval = ToonplayEvaluation {
            visual_storytelling: 3.0,
            dialogue_quality: 0.2,
            pacing_flow: 3.0,
            emotional_impact: 3.0,
            feedback: String::new(),
            suggested_improvements: Vec::new(),
        };
        assert_eq!(eval.score_out_of_range(), Some(("dialogue_quality", 0.2)));
    }
}
