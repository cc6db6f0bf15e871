//! Toonplay generator: scene prose to comic script.

use super::{STRUCTURED_TEMPERATURE, metadata_since, request};
use crate::prompts;
use fabula_core::{Generated, Toonplay};
use fabula_error::FabulaResult;
use fabula_interface::{TextDriver, generate_structured};
use std::time::Instant;

// Scripts need room for a dozen described panels.
const TOONPLAY_MAX_TOKENS: u32 = 4096;

/// Adapts scene prose into a panel-by-panel comic script.
pub struct ToonplayGenerator<'a> {
    driver: &'a dyn TextDriver,
}

impl<'a> ToonplayGenerator<'a> {
    /// Create a generator backed by the given driver.
    pub fn new(driver: &'a dyn TextDriver) -> Self {
        Self { driver }
    }

    /// Generate a toonplay for a scene's prose.
    #[tracing::instrument(skip(self, content), fields(scene = %scene_title))]
    pub async fn generate(
        &self,
        scene_title: &str,
        content: &str,
    ) -> FabulaResult<Generated<Toonplay>> {
        let start = Instant::now();
        let req = request(
            prompts::toonplay_prompt(scene_title, content),
            None,
            STRUCTURED_TEMPERATURE,
            TOONPLAY_MAX_TOKENS,
        );
        let toonplay: Toonplay = generate_structured(self.driver, &req).await?;
        tracing::info!(panels = toonplay.panel_count(), "Generated toonplay");
        Ok(Generated::new(
            toonplay,
            metadata_since(start, self.driver.model_name()),
        ))
    }

    /// Regenerate a toonplay as a full replacement, addressing feedback.
    #[tracing::instrument(skip_all)]
    pub async fn rewrite(
        &self,
        toonplay: &Toonplay,
        feedback: &str,
        suggestions: &[String],
    ) -> FabulaResult<Generated<Toonplay>> {
        let start = Instant::now();
        let req = request(
            prompts::toonplay_rewrite_prompt(toonplay, feedback, suggestions),
            None,
            STRUCTURED_TEMPERATURE,
            TOONPLAY_MAX_TOKENS,
        );
        let rewritten: Toonplay = generate_structured(self.driver, &req).await?;
        Ok(Generated::new(
            rewritten,
            metadata_since(start, self.driver.model_name()),
        ))
    }
}
