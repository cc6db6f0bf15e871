//! Story generator.

use super::{STRUCTURED_MAX_TOKENS, STRUCTURED_TEMPERATURE, metadata_since, request};
use crate::prompts;
use fabula_core::{Generated, Genre, StoryDraft, Tone};
use fabula_error::FabulaResult;
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

/// Inputs for a story generation run.
#[derive(Debug, Clone)]
pub struct StoryParams {
    /// Free-text premise from the user
    pub premise: String,
    /// Preferred genre, or let the model choose
    pub genre: Option<Genre>,
    /// Preferred tone, or let the model choose
    pub tone: Option<Tone>,
    /// Output language
    pub language: String,
}

impl StoryParams {
    /// Params with defaults: no genre/tone preference, English output.
    pub fn new(premise: impl Into<String>) -> Self {
        Self {
            premise: premise.into(),
            genre: None,
            tone: None,
            language: "English".to_string(),
        }
    }
}

/// Generates the root story entity.
pub struct StoryGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> StoryGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate a story draft.
    #[tracing::instrument(skip(self, params), fields(provider = self.driver.provider_name()))]
    pub async fn generate(&self, params: &StoryParams) -> FabulaResult<Generated<StoryDraft>> {
        let start = Instant::now();
        let req = request(
            prompts::story_prompt(&params.premise, params.genre, params.tone, &params.language),
            Some(prompts::story_system_prompt()),
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
        );
        let draft: StoryDraft = generate_structured(self.driver, &req).await?;
        tracing::info!(title = %draft.title, genre = %draft.genre, "Generated story draft");
        Ok(Generated::new(
            draft,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
