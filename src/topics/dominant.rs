// Dominant topic assignment: argmax over each document's topic weights.

use ndarray::Array2;

/// Index of the heaviest topic for each document (row) of `weights`.
///
/// Ties go to the lowest topic index. NaN weights never win. An all-zero row
/// (a segment with no retained terms) is assigned topic 0.
pub fn dominant_topics(weights: &Array2<f64>) -> Vec<usize> {
    weights
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_weight = f64::NEG_INFINITY;
            for (topic, &weight) in row.iter().enumerate() {
                if weight > best_weight {
                    best = topic;
                    best_weight = weight;
                }
            }
            best
        })
        .collect()
}
