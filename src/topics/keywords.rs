// Per-topic keyword listing from the fitted term loadings.
//
// Not needed for naming chapters (that re-vectorizes chapter text), but it is
// the quickest way to eyeball what each fitted topic is about.

use ndarray::Array2;

/// The `n` highest-loading vocabulary terms for each topic, heaviest first.
///
/// Ties keep vocabulary order. `loadings` must have one column per
/// vocabulary term.
pub fn top_terms_per_topic(loadings: &Array2<f64>, vocabulary: &[String], n: usize) -> Vec<Vec<String>> {
    loadings
        .rows()
        .into_iter()
        .map(|row| {
            let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ranked
                .into_iter()
                .take(n)
                .filter_map(|(col, _)| vocabulary.get(col).cloned())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn vocab() -> Vec<String> {
        ["bread", "goal", "oven", "score"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_top_terms_ordered_by_loading() {
        let loadings = array![[0.9, 0.0, 0.5, 0.1], [0.0, 0.8, 0.0, 1.2]];
        let topics = top_terms_per_topic(&loadings, &vocab(), 2);
        assert_eq!(topics, vec![vec!["bread", "oven"], vec!["score", "goal"]]);
    }

    #[test]
    fn test_ties_keep_vocabulary_order() {
        let loadings = array![[0.3, 0.3, 0.3, 0.3]];
        let topics = top_terms_per_topic(&loadings, &vocab(), 3);
        assert_eq!(topics, vec![vec!["bread", "goal", "oven"]]);
    }

    #[test]
    fn test_n_larger_than_vocabulary() {
        let loadings = array![[0.1, 0.2, 0.3, 0.4]];
        let topics = top_terms_per_topic(&loadings, &vocab(), 10);
        assert_eq!(topics[0].len(), 4);
    }
}
