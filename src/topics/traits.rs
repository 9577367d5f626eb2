// Topic model trait: swap-ready abstraction.
//
// Downstream stages only see per-document topic weights and per-topic term
// loadings, so any factorization or clustering method that produces
// non-negative versions of both can stand in for the default NMF.

use ndarray::Array2;

use super::vectorizer::DocumentTermMatrix;
use crate::error::Result;

/// Output of fitting a topic model over a document-term matrix.
#[derive(Debug, Clone)]
pub struct TopicFit {
    /// One row per document, one non-negative weight per topic
    pub weights: Array2<f64>,
    /// One row per topic, one non-negative loading per vocabulary term
    pub loadings: Array2<f64>,
}

impl TopicFit {
    pub fn n_topics(&self) -> usize {
        self.weights.ncols()
    }
}

/// Trait for fitting a fixed-rank topic decomposition.
///
/// Implementations must be deterministic for a given `seed` and matrix.
pub trait TopicModel {
    /// Fit `k` topics over `matrix`.
    fn fit(&self, matrix: &DocumentTermMatrix, k: usize, seed: u64) -> Result<TopicFit>;
}
