//! Evaluate-rewrite loop for scene prose.

use super::{DEFAULT_MAX_ITERATIONS, MIN_REWRITE_RATIO, QUALITY_THRESHOLD};
use crate::generators::ProseEvaluator;
use fabula_error::FabulaResult;
use fabula_interface::TextDriver;

/// Result of a prose quality loop run.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityOutcome {
    /// Final content, possibly rewritten
    pub content: String,
    /// Maximum overall score observed across iterations, not necessarily
    /// the final iteration's score
    pub best_score: f32,
    /// Iterations consumed (each iteration is one evaluation)
    pub iterations: u32,
    /// Whether any rewrite replaced the content
    pub improved: bool,
    /// Whether the loop exited at the iteration ceiling below the threshold
    pub accepted_at_ceiling: bool,
}

/// Bounded evaluate-rewrite cycle for scene prose.
pub struct ProseQualityLoop<'a> {
    evaluator: ProseEvaluator<'a>,
    max_iterations: u32,
}

impl<'a> ProseQualityLoop<'a> {
    /// Loop with the default iteration ceiling.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self::with_max_iterations(driver, DEFAULT_MAX_ITERATIONS)
    }

    /// Loop with an explicit iteration ceiling (minimum 1).
    pub fn with_max_iterations(driver: &'a dyn TextDriver, max_iterations: u32) -> Self {
        Self {
            evaluator: ProseEvaluator::new(driver),
            max_iterations: max_iterations.max(1),
        }
    }

    /// Run the loop over `content`.
    ///
    /// Each iteration evaluates; a score at or above the threshold accepts
    /// immediately, the final iteration accepts regardless of score, and
    /// anything else rewrites. A rewrite shorter than half the previous
    /// content is discarded (the iteration still counts).
    #[tracing::instrument(skip_all, fields(max_iterations = self.max_iterations))]
    pub async fn run(&self, mut content: String) -> FabulaResult<QualityOutcome> {
        let mut best_score = f32::NEG_INFINITY;
        let mut improved = false;

        for iteration in 1..=self.max_iterations {
            let evaluation = self.evaluator.evaluate(&content).await?.data;
            best_score = best_score.max(evaluation.overall_score);

            if evaluation.overall_score >= QUALITY_THRESHOLD {
                tracing::info!(iteration, score = evaluation.overall_score, "Prose accepted");
                return Ok(QualityOutcome {
                    content,
                    best_score,
                    iterations: iteration,
                    improved,
                    accepted_at_ceiling: false,
                });
            }

            if iteration == self.max_iterations {
                tracing::info!(
                    iteration,
                    score = evaluation.overall_score,
                    "Prose accepted at iteration ceiling"
                );
                return Ok(QualityOutcome {
                    content,
                    best_score,
                    iterations: iteration,
                    improved,
                    accepted_at_ceiling: true,
                });
            }

            let rewrite = self.evaluator.rewrite(&content, &evaluation).await?.data;
            if rewrite.len() as f32 > MIN_REWRITE_RATIO * content.len() as f32 {
                content = rewrite;
                improved = true;
            } else {
                tracing::warn!(
                    iteration,
                    rewrite_len = rewrite.len(),
                    previous_len = content.len(),
                    "Rewrite too short, keeping prior content"
                );
            }
        }

        unreachable!("loop exits via accept or ceiling")
    }
}
