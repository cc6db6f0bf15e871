//! Evaluate-rewrite loop for toonplays, with a structural gate.

use super::{DEFAULT_MAX_ITERATIONS, MIN_REWRITE_RATIO, QUALITY_THRESHOLD};
use crate::generators::{ToonplayEvaluator, ToonplayGenerator};
use fabula_core::Toonplay;
use fabula_error::FabulaResult;
use fabula_interface::TextDriver;

/// Narration may appear on fewer than this share of panels.
pub const MAX_NARRATION_RATIO: f32 = 0.05;
/// At least this share of panels must carry dialogue.
pub const MIN_DIALOGUE_RATIO: f32 = 0.60;
/// Minimum number of distinct shot types.
pub const MIN_DISTINCT_SHOTS: usize = 5;

/// Structural gate violations for a toonplay, one message per violation.
///
/// Checked independently of the LLM rubric score: a script can score 4.5
/// and still fail here. Empty result means the gate passes.
pub fn structural_issues(toonplay: &Toonplay) -> Vec<String> {
    let mut issues = Vec::new();

    let narration = toonplay.narration_ratio();
    if narration >= MAX_NARRATION_RATIO {
        issues.push(format!(
            "Reduce narration: {:.0}% of panels carry narration, the limit is {:.0}%. \
             Convert narration into dialogue or visual description.",
            narration * 100.0,
            MAX_NARRATION_RATIO * 100.0
        ));
    }

    let dialogue = toonplay.dialogue_ratio();
    if dialogue < MIN_DIALOGUE_RATIO {
        issues.push(format!(
            "Increase dialogue coverage: {:.0}% of panels have dialogue, at least {:.0}% must.",
            dialogue * 100.0,
            MIN_DIALOGUE_RATIO * 100.0
        ));
    }

    let distinct = toonplay.distinct_shot_types();
    if distinct < MIN_DISTINCT_SHOTS {
        issues.push(format!(
            "Vary the camera: {distinct} distinct shot types used, at least {MIN_DISTINCT_SHOTS} required."
        ));
    }

    if !toonplay.has_special_shot() {
        issues.push(
            "Add at least one special shot (extreme close-up, POV, bird's-eye, or Dutch angle)."
                .to_string(),
        );
    }

    let silent = toonplay.silent_panels();
    if !silent.is_empty() {
        issues.push(format!(
            "Panels {:?} have neither dialogue nor narration; every panel needs one or the other.",
            silent
        ));
    }

    issues
}

/// Result of a toonplay quality loop run.
#[derive(Debug, Clone, PartialEq)]
pub struct ToonplayOutcome {
    /// Final toonplay, possibly rewritten
    pub toonplay: Toonplay,
    /// Maximum weighted score observed across iterations
    pub best_score: f32,
    /// Iterations consumed
    pub iterations: u32,
    /// Whether any rewrite replaced the script
    pub improved: bool,
    /// Whether the final script passes the structural gate
    pub structural_pass: bool,
    /// Gate violations for the final script
    pub quality_gate_issues: Vec<String>,
    /// Whether the loop exited at the iteration ceiling without acceptance
    pub accepted_at_ceiling: bool,
}

/// Bounded evaluate-rewrite cycle for toonplays.
///
/// Acceptance needs both the weighted rubric score at or above the
/// threshold AND a clean structural gate; gate violations are fed into the
/// next rewrite as extra improvement suggestions.
pub struct ToonplayQualityLoop<'a> {
    generator: ToonplayGenerator<'a>,
    evaluator: ToonplayEvaluator<'a>,
    max_iterations: u32,
}

impl<'a> ToonplayQualityLoop<'a> {
    /// Loop with the default iteration ceiling.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self::with_max_iterations(driver, DEFAULT_MAX_ITERATIONS)
    }

    /// Loop with an explicit iteration ceiling (minimum 1).
    pub fn with_max_iterations(driver: &'a dyn TextDriver, max_iterations: u32) -> Self {
        Self {
            generator: ToonplayGenerator::new(driver),
            evaluator: ToonplayEvaluator::new(driver),
            max_iterations: max_iterations.max(1),
        }
    }

    /// Run the loop over `toonplay`.
    #[tracing::instrument(skip_all, fields(max_iterations = self.max_iterations))]
    pub async fn run(&self, mut toonplay: Toonplay) -> FabulaResult<ToonplayOutcome> {
        let mut best_score = f32::NEG_INFINITY;
        let mut improved = false;

        for iteration in 1..=self.max_iterations {
            let evaluation = self.evaluator.evaluate(&toonplay).await?.data;
            let score = evaluation.weighted_score();
            best_score = best_score.max(score);

            let issues = structural_issues(&toonplay);
            let structural_pass = issues.is_empty();

            if score >= QUALITY_THRESHOLD && structural_pass {
                tracing::info!(iteration, score, "Toonplay accepted");
                return Ok(ToonplayOutcome {
                    toonplay,
                    best_score,
                    iterations: iteration,
                    improved,
                    structural_pass: true,
                    quality_gate_issues: issues,
                    accepted_at_ceiling: false,
                });
            }

            if iteration == self.max_iterations {
                tracing::info!(
                    iteration,
                    score,
                    structural_pass,
                    "Toonplay accepted at iteration ceiling"
                );
                return Ok(ToonplayOutcome {
                    toonplay,
                    best_score,
                    iterations: iteration,
                    improved,
                    structural_pass,
                    quality_gate_issues: issues,
                    accepted_at_ceiling: true,
                });
            }

            let mut suggestions = evaluation.suggested_improvements.clone();
            suggestions.extend(issues);
            let rewrite = self
                .generator
                .rewrite(&toonplay, &evaluation.feedback, &suggestions)
                .await?
                .data;

            // Same anti-truncation guard as the prose loop, over panel count.
            if rewrite.panel_count() as f32 > MIN_REWRITE_RATIO * toonplay.panel_count() as f32 {
                toonplay = rewrite;
                improved = true;
            } else {
                tracing::warn!(
                    iteration,
                    rewrite_panels = rewrite.panel_count(),
                    previous_panels = toonplay.panel_count(),
                    "Rewrite dropped too many panels, keeping prior script"
                );
            }
        }

        unreachable!("loop exits via accept or ceiling")
    }
}
