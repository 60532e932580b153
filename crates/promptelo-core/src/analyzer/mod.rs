//! End-to-end prompt analysis.
//!
//! Validates the input, computes the four local criteria, asks the novelty
//! service (which may degrade to unavailable), and aggregates everything
//! into a rating. Novelty being unreachable never fails an analysis; only
//! invalid local input does.


use thiserror::Error;
use tracing::debug;

use crate::constants::MAX_PROMPT_CHARS;
use crate::criteria::CriterionScores;
use crate::novelty::{NoveltyClient, NoveltyOutcome};
use crate::rating::{self, Rating, Suggestion};

/// Errors from local analysis. Remote failures are not represented here;
/// they surface as [`NoveltyOutcome::Unavailable`] inside the analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The prompt exceeds [`MAX_PROMPT_CHARS`].
    #[error("prompt is {length} characters, limit is {MAX_PROMPT_CHARS}")]
    PromptTooLong {
        /// Observed character count.
        length: usize,
    },
}

/// Full scoring breakdown for one prompt.
#[derive(Debug, Clone)]
pub struct PromptAnalysis {
    /// The four local criterion scores.
    pub scores: CriterionScores,
    /// Novelty outcome (may be unavailable).
    pub novelty: NoveltyOutcome,
    /// Aggregated rating, tier, and per-criterion breakdown.
    pub rating: Rating,
    /// Advice for the weakest criterion, when one falls below the floor.
    pub suggestion: Option<Suggestion>,
}

/// Scores prompts end to end against a novelty client.
#[derive(Debug)]
pub struct PromptAnalyzer {
    client: NoveltyClient,
}

impl PromptAnalyzer {
    /// Creates an analyzer around an existing client.
    pub fn new(client: NoveltyClient) -> Self {
        Self { client }
    }

    /// Returns the underlying novelty client.
    pub fn client(&self) -> &NoveltyClient {
        &self.client
    }

    /// Analyzes `prompt` and returns the full breakdown.
    pub async fn analyze(&self, prompt: &str) -> Result<PromptAnalysis, AnalyzeError> {
        let length = prompt.chars().count();
        if length > MAX_PROMPT_CHARS {
            return Err(AnalyzeError::PromptTooLong { length });
        }

        let scores = CriterionScores::analyze(prompt);
        let novelty = self.client.score(prompt).await;

        debug!(
            clarity = scores.clarity,
            specificity = scores.specificity,
            context = scores.context,
            creativity = scores.creativity,
            novelty = novelty.debug_status(),
            "prompt scored"
        );

        let rating = rating::aggregate(&scores, &novelty);
        let suggestion = rating::top_suggestion(&scores, &novelty);

        Ok(PromptAnalysis {
            scores,
            novelty,
            rating,
            suggestion,
        })
    }

    /// Analyzes `prompt` without contacting the novelty service.
    ///
    /// Equivalent to an analysis where the service is unreachable; useful
    /// for offline scoring.
    pub fn analyze_local(&self, prompt: &str) -> Result<PromptAnalysis, AnalyzeError> {
        let length = prompt.chars().count();
        if length > MAX_PROMPT_CHARS {
            return Err(AnalyzeError::PromptTooLong { length });
        }

        let scores = CriterionScores::analyze(prompt);
        let novelty = NoveltyOutcome::Unavailable;
        let rating = rating::aggregate(&scores, &novelty);
        let suggestion = rating::top_suggestion(&scores, &novelty);

        Ok(PromptAnalysis {
            scores,
            novelty,
            rating,
            suggestion,
        })
    }
}
