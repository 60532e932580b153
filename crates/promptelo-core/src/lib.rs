//! Promptelo client library.
//!
//! Scores a prompt on four locally-computed criteria, asks the community
//! server how novel it is relative to everything seen so far, and folds
//! both into a single bounded Elo rating with a tier and per-criterion
//! breakdown.
//!
//! # Public API Surface
//!
//! ## Scoring
//! - [`CriterionScores`] - the four rule-based sub-scores
//! - [`Rating`], [`Tier`], [`NoveltyLabel`] - aggregation output
//! - [`aggregate`], [`top_suggestion`] - pure aggregation entry points
//! - [`PromptAnalyzer`], [`PromptAnalysis`] - end-to-end pipeline
//!
//! ## Novelty client
//! - [`NoveltyClient`] - one bounded call per prompt, no retry
//! - [`NoveltyOutcome`] - `Available` | `Unavailable`; the unavailable
//!   state is a first-class value, consumed by weight redistribution in
//!   the aggregator rather than a sentinel score
//!
//! ## Configuration
//! - [`ClientConfig`] - file-backed config with environment overrides
//!
//! The wire types in [`novelty::types`] are shared with the server crate.

pub mod analyzer;
pub mod config;
pub mod constants;
pub mod criteria;
pub mod novelty;
pub mod rating;

pub use analyzer::{AnalyzeError, PromptAnalysis, PromptAnalyzer};
pub use config::{ClientConfig, ConfigError};
pub use constants::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, ELO_MAX, MAX_PROMPT_CHARS};
pub use criteria::{Criterion, CriterionScores};
pub use novelty::{
    GlobalStats, HealthStatus, NoveltyClient, NoveltyClientError, NoveltyOutcome, NoveltyResult,
    PercentileThresholds, ScoreRequest, ScoreResponse,
};
pub use rating::{CriterionContribution, NoveltyLabel, Rating, Suggestion, Tier, aggregate, top_suggestion};
