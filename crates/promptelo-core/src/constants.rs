//! Shared constants for scoring and the novelty client.

/// Maximum accepted prompt length, in characters.
///
/// Longer inputs are rejected before any scoring happens; the same limit is
/// enforced server-side on `/api/v1/score`.
pub const MAX_PROMPT_CHARS: usize = 10_000;

/// Default community server URL used when no config file or env override is present.
pub const DEFAULT_SERVER_URL: &str = "https://promptelo-api.onrender.com";

/// Default novelty request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Aggregation weight for the clarity criterion.
pub const WEIGHT_CLARITY: f64 = 0.25;
/// Aggregation weight for the specificity criterion.
pub const WEIGHT_SPECIFICITY: f64 = 0.25;
/// Aggregation weight for the context criterion.
pub const WEIGHT_CONTEXT: f64 = 0.20;
/// Aggregation weight for the creativity criterion.
pub const WEIGHT_CREATIVITY: f64 = 0.15;
/// Aggregation weight for the novelty criterion (redistributed when unavailable).
pub const WEIGHT_NOVELTY: f64 = 0.15;

/// Elo value a perfectly average prompt (weighted sum 0.5) maps to.
pub const ELO_BASE: f64 = 1200.0;

/// Elo spread: weighted sum 0.0 maps to `ELO_BASE - ELO_RANGE / 2` and 1.0 to
/// `ELO_BASE + ELO_RANGE / 2` before bonuses and clamping.
pub const ELO_RANGE: f64 = 1200.0;

/// Upper bound of the rating scale. Ratings are clamped to `0..=ELO_MAX`.
pub const ELO_MAX: u32 = 2400;

/// Bonus granted when every contributing criterion exceeds this floor.
pub const SYNERGY_FLOOR_LOW: f64 = 0.7;
/// Second bonus floor for exceptional all-around prompts.
pub const SYNERGY_FLOOR_HIGH: f64 = 0.8;
/// Elo bonus granted per satisfied synergy floor.
pub const SYNERGY_BONUS: f64 = 100.0;

/// Criteria scoring at or above this value produce no improvement suggestion.
pub const SUGGESTION_FLOOR: f64 = 0.7;
