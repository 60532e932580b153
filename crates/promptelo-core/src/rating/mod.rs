//! Rating aggregation.
//!
//! Combines the four local criteria and the novelty outcome into a bounded
//! Elo rating with a tier and per-criterion breakdown. Pure functions; the
//! same inputs always produce the same rating.

pub mod types;


pub use types::{CriterionContribution, NoveltyLabel, Rating, Suggestion, Tier};

use crate::constants::{
    ELO_BASE, ELO_MAX, ELO_RANGE, SYNERGY_BONUS, SYNERGY_FLOOR_HIGH, SYNERGY_FLOOR_LOW,
    WEIGHT_CLARITY, WEIGHT_CONTEXT, WEIGHT_CREATIVITY, WEIGHT_NOVELTY, WEIGHT_SPECIFICITY,
};
use crate::criteria::{Criterion, CriterionScores};
use crate::novelty::NoveltyOutcome;

/// Nominal weight of a criterion before any redistribution.
pub fn nominal_weight(criterion: Criterion) -> f64 {
    match criterion {
        Criterion::Clarity => WEIGHT_CLARITY,
        Criterion::Specificity => WEIGHT_SPECIFICITY,
        Criterion::Context => WEIGHT_CONTEXT,
        Criterion::Creativity => WEIGHT_CREATIVITY,
        Criterion::Novelty => WEIGHT_NOVELTY,
    }
}

/// Aggregates criteria and the novelty outcome into a rating.
///
/// When novelty is unavailable its weight is redistributed proportionally
/// over the four local criteria (each divided by `1 - WEIGHT_NOVELTY`), so
/// the effective weights always sum to 1. The novelty breakdown entry then
/// carries no score instead of a fabricated one.
pub fn aggregate(scores: &CriterionScores, novelty: &NoveltyOutcome) -> Rating {
    let novelty_score = novelty.score();

    let scale = match novelty_score {
        Some(_) => 1.0,
        None => 1.0 - WEIGHT_NOVELTY,
    };

    let mut breakdown = Vec::with_capacity(5);
    let mut weighted_sum = 0.0;
    let mut min_score = f64::INFINITY;

    for criterion in Criterion::LOCAL {
        let score = scores.get(criterion);
        let weight = nominal_weight(criterion) / scale;
        let contribution = score * weight;
        weighted_sum += contribution;
        min_score = min_score.min(score);
        breakdown.push(CriterionContribution {
            criterion,
            score: Some(score),
            weight,
            contribution,
        });
    }

    match novelty_score {
        Some(score) => {
            let weight = WEIGHT_NOVELTY;
            let contribution = score * weight;
            weighted_sum += contribution;
            min_score = min_score.min(score);
            breakdown.push(CriterionContribution {
                criterion: Criterion::Novelty,
                score: Some(score),
                weight,
                contribution,
            });
        }
        None => breakdown.push(CriterionContribution {
            criterion: Criterion::Novelty,
            score: None,
            weight: 0.0,
            contribution: 0.0,
        }),
    }

    let mut elo = ELO_BASE + (weighted_sum - 0.5) * ELO_RANGE;
    if min_score > SYNERGY_FLOOR_LOW {
        elo += SYNERGY_BONUS;
    }
    if min_score > SYNERGY_FLOOR_HIGH {
        elo += SYNERGY_BONUS;
    }

    let elo = elo.round().clamp(0.0, ELO_MAX as f64) as u32;

    Rating {
        elo,
        tier: Tier::for_rating(elo),
        breakdown,
    }
}

/// Suggestion for the lowest-scoring criterion, or `None` when every
/// available score clears the suggestion floor.
///
/// Ties resolve in canonical criterion order; novelty participates only
/// when it was actually scored.
pub fn top_suggestion(scores: &CriterionScores, novelty: &NoveltyOutcome) -> Option<Suggestion> {
    let (mut lowest, mut lowest_score) = scores.lowest();

    if let Some(novelty_score) = novelty.score() {
        if novelty_score < lowest_score {
            lowest = Criterion::Novelty;
            lowest_score = novelty_score;
        }
    }

    Suggestion::warranted(lowest_score).then(|| Suggestion::for_criterion(lowest))
}
