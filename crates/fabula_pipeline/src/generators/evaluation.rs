//! Rubric evaluators and the prose rewriter.

use super::{
    PROSE_MAX_TOKENS, PROSE_TEMPERATURE, STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE,
    metadata_since, request,
};
use crate::prompts;
use fabula_core::{Generated, ProseEvaluation, SCORE_MAX, SCORE_MIN, Toonplay, ToonplayEvaluation};
use fabula_error::{FabulaResult, SchemaError, SchemaErrorKind};
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

fn reject_out_of_range(
    entity: &str,
    violation: Option<(&'static str, f32)>,
) -> FabulaResult<()> {
    match violation {
        Some((field, value)) => {
            tracing::warn!(entity, field, value, "Rejected out-of-range rubric score");
            Err(SchemaError::new(SchemaErrorKind::Validation {
                entity: entity.to_string(),
                message: format!(
                    "score '{field}' is {value}, outside [{SCORE_MIN}, {SCORE_MAX}]"
                ),
            }))?
        }
        None => Ok(()),
    }
}

/// Scores scene prose against the five-category rubric and produces
/// full-replacement rewrites.
pub struct ProseEvaluator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> ProseEvaluator<'a> {
    /// Create an evaluator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Score the given prose.
    #[tracing::instrument(skip_all)]
    pub async fn evaluate(&self, content: &str) -> FabulaResult<Generated<ProseEvaluation>> {
        let start = Instant::now();
        let req = request(
            prompts::prose_evaluation_prompt(content),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let evaluation: ProseEvaluation = generate_structured(self.driver, &req).await?;
        reject_out_of_range("ProseEvaluation", evaluation.score_out_of_range())?;
        tracing::info!(score = evaluation.overall_score, "Evaluated scene prose");
        Ok(Generated::new(
            evaluation,
            metadata_since(start, self.driver.model_name()),
        ))
    }

    /// Rewrite the prose as a full replacement addressing the evaluation.
    #[tracing::instrument(skip_all)]
    pub async fn rewrite(
        &self,
        content: &str,
        evaluation: &ProseEvaluation,
    ) -> FabulaResult<Generated<String>> {
        let start = Instant::now();
        let req = request(
            prompts::prose_rewrite_prompt(content, evaluation),
            None,
            PROSE_TEMPERATURE,
            PROSE_MAX_TOKENS,
        );
        let generation = self.driver.generate(&req).await?;
        Ok(Generated::new(
            generation.text.trim().to_string(),
            metadata_since(start, self.driver.model_name()),
        ))
    }
}

/// Scores toonplays against the weighted four-category rubric.
pub struct ToonplayEvaluator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> ToonplayEvaluator<'a> {
    /// Create an evaluator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Score the given toonplay.
    #[tracing::instrument(skip_all)]
    pub async fn evaluate(&self, toonplay: &Toonplay) -> FabulaResult<Generated<ToonplayEvaluation>> {
        let start = Instant::now();
        let req = request(
            prompts::toonplay_evaluation_prompt(toonplay),
            None,
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let evaluation: ToonplayEvaluation = generate_structured(self.driver, &req).await?;
        reject_out_of_range("ToonplayEvaluation", evaluation.score_out_of_range())?;
        tracing::info!(
            score = evaluation.weighted_score(),
            "Evaluated toonplay"
        );
        Ok(Generated::new(
            evaluation,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
