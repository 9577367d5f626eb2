// Transcript overview: size, timing, text lengths and the most used terms.
//
// Printed by `chapterize stats` before anyone spends time tuning the topic
// model: a transcript with a handful of segments, or one dominated by a few
// filler words, will not chapterize well no matter the settings.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::info;

use crate::topics::vectorizer::TermVectorizer;
use crate::transcript::Segment;

/// Summary numbers for a transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranscriptStats {
    pub segment_count: usize,
    pub first_start: f64,
    pub last_start: f64,
    /// Text length in characters
    pub min_text_length: usize,
    pub max_text_length: usize,
    pub mean_text_length: f64,
}

impl TranscriptStats {
    /// Compute stats; an empty transcript gives all zeros.
    pub fn compute(segments: &[Segment]) -> Self {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return Self::default();
        };

        let lengths: Vec<usize> = segments.iter().map(|s| s.text.chars().count()).collect();
        let total: usize = lengths.iter().sum();

        Self {
            segment_count: segments.len(),
            first_start: first.start,
            last_start: last.start,
            min_text_length: lengths.iter().copied().min().unwrap_or(0),
            max_text_length: lengths.iter().copied().max().unwrap_or(0),
            mean_text_length: total as f64 / segments.len() as f64,
        }
    }
}

/// The `n` most frequent non-stop-word terms over the whole transcript.
///
/// Ordered by count, most frequent first; ties are lexical.
pub fn common_terms(segments: &[Segment], n: usize) -> Vec<(String, usize)> {
    let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
    let Ok(matrix) = TermVectorizer::default().fit_transform(&texts) else {
        return Vec::new();
    };

    let mut totals: Vec<(String, usize)> = matrix
        .term_totals()
        .into_iter()
        .map(|(term, total)| (term, total as usize))
        .collect();
    // Stable sort over a lexical vocabulary keeps ties lexical.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(n);
    totals
}

/// Terms that set some segments apart from the rest, ranked by TF-IDF.
///
/// Each segment is its own document, so terms spread evenly over the whole
/// transcript are downweighted while terms concentrated in a few segments
/// rise to the top. Useful for spotting what the topic model can latch onto.
pub fn distinctive_terms(segments: &[Segment], n: usize) -> Result<Vec<(String, f32)>> {
    if segments.is_empty() {
        anyhow::bail!("No segments to analyze: cannot rank distinctive terms");
    }

    let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
    let stop_words: Vec<String> = get(LANGUAGE::English);

    let params = TfIdfParams::UnprocessedDocuments(&texts, &stop_words, None);
    let tfidf = TfIdf::new(params);
    let mut ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(n);

    if ranked.is_empty() {
        anyhow::bail!(
            "TF-IDF produced no terms from {} segments: segments may be too short or uniform",
            segments.len()
        );
    }

    // The library's order among equal scores is unspecified.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    info!(
        terms = ranked.len(),
        top_term = &ranked[0].0,
        top_score = ranked[0].1,
        "Ranked distinctive terms"
    );

    Ok(ranked)
}
