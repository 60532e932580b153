use serde::{Deserialize, Serialize};

use crate::constants::{ELO_MAX, SUGGESTION_FLOOR};
use crate::criteria::Criterion;

/// Named rating band. Ordered, exhaustive, non-overlapping over `0..=ELO_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Novice,
    Rising,
    Skilled,
    Expert,
    Master,
    Legendary,
}

/// Lower Elo bound of each tier, ascending. The first entry covers from 0.
const TIER_BANDS: [(u32, Tier); 6] = [
    (0, Tier::Novice),
    (1200, Tier::Rising),
    (1500, Tier::Skilled),
    (1800, Tier::Expert),
    (2000, Tier::Master),
    (2200, Tier::Legendary),
];

impl Tier {
    /// Tier for a rating. Total over `u32`; ratings above the scale cap map
    /// to the top band.
    pub fn for_rating(elo: u32) -> Tier {
        let mut tier = Tier::Novice;
        for (lower_bound, candidate) in TIER_BANDS {
            if elo >= lower_bound {
                tier = candidate;
            }
        }
        tier
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Novice => "NOVICE",
            Tier::Rising => "RISING",
            Tier::Skilled => "SKILLED",
            Tier::Expert => "EXPERT",
            Tier::Master => "MASTER",
            Tier::Legendary => "LEGENDARY",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Band label for a novelty percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoveltyLabel {
    Frequent,
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl NoveltyLabel {
    /// Label for a percentile in `[0, 100]`.
    pub fn for_percentile(percentile: f64) -> NoveltyLabel {
        if percentile >= 95.0 {
            NoveltyLabel::Legendary
        } else if percentile >= 85.0 {
            NoveltyLabel::Rare
        } else if percentile >= 70.0 {
            NoveltyLabel::Uncommon
        } else if percentile >= 30.0 {
            NoveltyLabel::Common
        } else {
            NoveltyLabel::Frequent
        }
    }
}

/// One criterion's share of the final rating.
///
/// `score` is `None` when the criterion could not be scored (novelty with
/// the service unreachable); its weight is then zero and the remaining
/// weights are renormalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: Criterion,
    pub score: Option<f64>,
    pub weight: f64,
    pub contribution: f64,
}

/// A bounded Elo rating with its tier and per-criterion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub elo: u32,
    pub tier: Tier,
    pub breakdown: Vec<CriterionContribution>,
}

impl Rating {
    /// Returns `true` if the rating sits inside the declared scale.
    pub fn in_bounds(&self) -> bool {
        self.elo <= ELO_MAX
    }

    /// The breakdown entry for `criterion`, if present.
    pub fn contribution(&self, criterion: Criterion) -> Option<&CriterionContribution> {
        self.breakdown.iter().find(|c| c.criterion == criterion)
    }
}

/// Improvement advice keyed by the weakest criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub criterion: Criterion,
    pub title: &'static str,
    pub advice: &'static str,
}

impl Suggestion {
    /// Deterministic lookup for a criterion.
    pub fn for_criterion(criterion: Criterion) -> Suggestion {
        let (title, advice) = match criterion {
            Criterion::Clarity => (
                "Improve clarity",
                "Use specific action verbs (create, implement, fix) and avoid vague language \
                 like 'something' or 'stuff'. Structure your request in clear sentences.",
            ),
            Criterion::Specificity => (
                "Add more details",
                "Include file names, function names, or code snippets. Mention specific \
                 technologies, versions, or constraints that are relevant.",
            ),
            Criterion::Context => (
                "Provide more context",
                "Explain your current situation, what you've tried, and any constraints. \
                 Include error messages or relevant background information.",
            ),
            Criterion::Creativity => (
                "Explore different approaches",
                "Consider asking about alternative solutions, best practices, or trade-offs. \
                 Frame problems in interesting or novel ways.",
            ),
            Criterion::Novelty => (
                "Try unique requests",
                "Your prompt is similar to many others. Consider combining concepts in new \
                 ways or exploring less common use cases.",
            ),
        };
        Suggestion {
            criterion,
            title,
            advice,
        }
    }

    /// Whether a score is low enough to warrant a suggestion.
    pub fn warranted(score: f64) -> bool {
        score < SUGGESTION_FLOOR
    }
}
