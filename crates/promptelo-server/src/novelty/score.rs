//! Novelty score transform.
//!
//! Maps neighbor similarities to a novelty score in `[0, 1]`: a decreasing
//! function of rank-weighted mean similarity, damped by how many similar
//! prompts exist at all.

use crate::store::Neighbor;

/// How many of the nearest neighbors participate in the weighted mean.
const TOP_WEIGHTED: usize = 10;

/// Novelty for a set of similar neighbors (already filtered to the
/// similarity floor, ordered by decreasing similarity).
///
/// An empty slice means nothing similar exists: maximal novelty. Otherwise
/// the top neighbors contribute with harmonically decreasing weights, the
/// mean similarity runs through a piecewise transform (near-duplicates
/// collapse toward 0, merely-related prompts stay mid-range), and the
/// result is damped by the neighbor count.
pub fn novelty_from_neighbors(similar: &[Neighbor]) -> f64 {
    if similar.is_empty() {
        return 1.0;
    }

    let mut total_weight = 0.0;
    let mut weighted_similarity = 0.0;
    for (rank, neighbor) in similar.iter().take(TOP_WEIGHTED).enumerate() {
        let weight = 1.0 / (rank as f64 + 1.0);
        weighted_similarity += neighbor.similarity as f64 * weight;
        total_weight += weight;
    }
    let avg_similarity = if total_weight > 0.0 {
        weighted_similarity / total_weight
    } else {
        0.0
    };

    let novelty = if avg_similarity >= 0.95 {
        0.1 * (1.0 - avg_similarity) / 0.05
    } else if avg_similarity >= 0.85 {
        0.1 + 0.4 * (0.95 - avg_similarity) / 0.10
    } else if avg_similarity >= 0.70 {
        0.5 + 0.3 * (0.85 - avg_similarity) / 0.15
    } else {
        0.8 + 0.2 * (0.70 - avg_similarity) / 0.70
    };

    let count_factor = 1.0 / (1.0 + similar.len() as f64 * 0.05);
    (novelty * (0.7 + 0.3 * count_factor)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::novelty_from_neighbors;
    use crate::store::Neighbor;

    fn neighbors(similarities: &[f32]) -> Vec<Neighbor> {
        similarities
            .iter()
            .enumerate()
            .map(|(i, &similarity)| Neighbor {
                id: i as u64,
                similarity,
                novelty_score: 0.5,
            })
            .collect()
    }

    #[test]
    fn no_neighbors_means_maximal_novelty() {
        assert_eq!(novelty_from_neighbors(&[]), 1.0);
    }

    #[test]
    fn exact_duplicate_collapses_to_zero() {
        let score = novelty_from_neighbors(&neighbors(&[1.0]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn closer_neighbors_mean_lower_novelty() {
        let near = novelty_from_neighbors(&neighbors(&[0.96]));
        let related = novelty_from_neighbors(&neighbors(&[0.88]));
        let distant = novelty_from_neighbors(&neighbors(&[0.72]));

        assert!(near < related);
        assert!(related < distant);
    }

    #[test]
    fn more_neighbors_dampen_novelty() {
        let few = novelty_from_neighbors(&neighbors(&[0.75; 2]));
        let many = novelty_from_neighbors(&neighbors(&[0.75; 40]));

        assert!(many < few);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let cases: [&[f32]; 5] = [
            &[1.0; 50],
            &[0.95],
            &[0.85, 0.8, 0.75],
            &[0.70],
            &[0.0],
        ];
        for similarities in cases {
            let score = novelty_from_neighbors(&neighbors(similarities));
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn early_ranks_dominate_the_weighted_mean() {
        // One near-duplicate in front of distant neighbors pulls novelty
        // well below the distant-only case.
        let with_duplicate = novelty_from_neighbors(&neighbors(&[0.99, 0.72, 0.71]));
        let distant_only = novelty_from_neighbors(&neighbors(&[0.72, 0.71, 0.70]));

        assert!(with_duplicate < distant_only);
    }
}
