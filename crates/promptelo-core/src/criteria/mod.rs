//! Rule-based criterion scoring.
//!
//! Four independent signal families over raw prompt text, each a pure
//! function with no I/O. See [`signals`] for the individual heuristics.

pub mod signals;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// One of the locally-computed quality criteria (plus novelty, which is
/// scored remotely).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Clarity,
    Specificity,
    Context,
    Creativity,
    Novelty,
}

impl Criterion {
    /// The four criteria computed locally, in canonical order.
    pub const LOCAL: [Criterion; 4] = [
        Criterion::Clarity,
        Criterion::Specificity,
        Criterion::Context,
        Criterion::Creativity,
    ];

    /// Stable lowercase name (matches the wire format).
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Clarity => "clarity",
            Criterion::Specificity => "specificity",
            Criterion::Context => "context",
            Criterion::Creativity => "creativity",
            Criterion::Novelty => "novelty",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four local sub-scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub clarity: f64,
    pub specificity: f64,
    pub context: f64,
    pub creativity: f64,
}

impl CriterionScores {
    /// Scores `text` against all four local criteria.
    ///
    /// Pure and deterministic; never fails. The empty string yields the
    /// base score of each criterion rather than an error.
    pub fn analyze(text: &str) -> Self {
        Self {
            clarity: signals::clarity(text),
            specificity: signals::specificity(text),
            context: signals::context(text),
            creativity: signals::creativity(text),
        }
    }

    /// Returns the score for a local criterion.
    ///
    /// Panics if asked for [`Criterion::Novelty`], which is not computed here.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Clarity => self.clarity,
            Criterion::Specificity => self.specificity,
            Criterion::Context => self.context,
            Criterion::Creativity => self.creativity,
            Criterion::Novelty => panic!("novelty is not a local criterion"),
        }
    }

    /// Smallest of the four local scores.
    pub fn min(&self) -> f64 {
        self.clarity
            .min(self.specificity)
            .min(self.context)
            .min(self.creativity)
    }

    /// Lowest-scoring local criterion, ties resolved in canonical order.
    pub fn lowest(&self) -> (Criterion, f64) {
        let mut best = (Criterion::Clarity, self.clarity);
        for criterion in Criterion::LOCAL {
            let score = self.get(criterion);
            if score < best.1 {
                best = (criterion, score);
            }
        }
        best
    }
}
