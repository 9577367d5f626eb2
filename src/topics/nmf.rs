// Non-negative matrix factorization topic model.
//
// Factorizes the document-term matrix X (documents x terms) into
// W (documents x topics) and H (topics x terms) with the Lee-Seung
// multiplicative updates for the Frobenius objective. Multiplicative updates
// keep every entry non-negative as long as the initialization is, and the
// seeded initializer makes the whole fit reproducible.

use ndarray::{Array2, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::{TopicFit, TopicModel};
use super::vectorizer::DocumentTermMatrix;
use crate::error::{ChapterError, Result};

/// How often (in iterations) the reconstruction error is checked.
const CHECK_EVERY: usize = 10;

/// NMF topic model: the default `TopicModel`.
#[derive(Debug, Clone)]
pub struct NmfModel {
    /// Upper bound on multiplicative update rounds
    pub max_iter: usize,
    /// Stop once the relative error improvement between checks drops below this
    pub tol: f64,
}

impl Default for NmfModel {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tol: 1e-4,
        }
    }
}

impl TopicModel for NmfModel {
    fn fit(&self, matrix: &DocumentTermMatrix, k: usize, seed: u64) -> Result<TopicFit> {
        let x = &matrix.counts;
        let (documents, terms) = x.dim();
        check_rank(k, documents, terms)?;

        // Scale the random start so W·H has roughly the magnitude of X.
        let scale = (x.mean().unwrap_or(0.0) / k as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut w = Array2::from_shape_fn((documents, k), |_| rng.random::<f64>() * scale);
        let mut h = Array2::from_shape_fn((k, terms), |_| rng.random::<f64>() * scale);

        let initial_error = reconstruction_error(x, &w, &h);
        let mut previous_error = initial_error;
        let mut iterations = 0;

        for iter in 1..=self.max_iter {
            iterations = iter;

            let numerator = w.t().dot(x);
            let denominator = w.t().dot(&w).dot(&h);
            Zip::from(&mut h)
                .and(&numerator)
                .and(&denominator)
                .for_each(|h, &num, &den| *h *= num / (den + f64::EPSILON));

            let numerator = x.dot(&h.t());
            let denominator = w.dot(&h.dot(&h.t()));
            Zip::from(&mut w)
                .and(&numerator)
                .and(&denominator)
                .for_each(|w, &num, &den| *w *= num / (den + f64::EPSILON));

            if iter % CHECK_EVERY == 0 {
                let error = reconstruction_error(x, &w, &h);
                if initial_error <= 0.0 || (previous_error - error) / initial_error < self.tol {
                    break;
                }
                previous_error = error;
            }
        }

        debug!(
            topics = k,
            documents,
            terms,
            iterations,
            error = reconstruction_error(x, &w, &h),
            "Fitted NMF topic model"
        );

        Ok(TopicFit {
            weights: w,
            loadings: h,
        })
    }
}

fn check_rank(k: usize, documents: usize, terms: usize) -> Result<()> {
    let reason = if k == 0 {
        "topic count must be at least 1".to_string()
    } else if k > terms {
        format!("vocabulary has only {terms} terms")
    } else if k > documents {
        format!("corpus has only {documents} documents")
    } else {
        return Ok(());
    };
    Err(ChapterError::Fit { topics: k, reason })
}

/// Frobenius norm of X - W·H.
fn reconstruction_error(x: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> f64 {
    (x - &w.dot(h)).mapv(|v| v * v).sum().sqrt()
}
