// Document-term matrix construction.
//
// Every segment is one document. Tokenization is fixed so runs are
// reproducible: lowercase the text, take runs of two or more Unicode word
// characters between word boundaries, drop stop words. The vocabulary is kept
// in lexical order, which makes column order independent of input order.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use ndarray::{Array2, Axis};
use regex::Regex;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::error::{ChapterError, Result};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

static ENGLISH_STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::English).into_iter().collect());

/// Which stop-word list to filter tokens against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWords {
    #[default]
    English,
    None,
}

impl StopWords {
    /// Whether `token` (already lowercased) should be dropped.
    pub fn contains(self, token: &str) -> bool {
        match self {
            StopWords::English => ENGLISH_STOP_WORDS.contains(token),
            StopWords::None => false,
        }
    }
}

/// A document-frequency bound: either a fraction of the corpus or an
/// absolute number of documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocFrequency {
    Fraction(f64),
    Count(usize),
}

impl DocFrequency {
    /// Largest document count allowed when used as an upper bound.
    fn max_count(self, documents: usize) -> Result<usize> {
        match self {
            DocFrequency::Fraction(f) => {
                check_fraction(f)?;
                Ok((f * documents as f64).floor() as usize)
            }
            DocFrequency::Count(c) => Ok(c),
        }
    }

    /// Smallest document count required when used as a lower bound.
    fn min_count(self, documents: usize) -> Result<usize> {
        match self {
            DocFrequency::Fraction(f) => {
                check_fraction(f)?;
                Ok((f * documents as f64).ceil() as usize)
            }
            DocFrequency::Count(c) => Ok(c),
        }
    }
}

fn check_fraction(f: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&f) {
        return Err(ChapterError::InvalidConfig(format!(
            "document frequency fraction {f} is outside [0, 1]"
        )));
    }
    Ok(())
}

/// Split text into lowercase tokens, dropping stop words.
pub fn tokenize(text: &str, stop_words: StopWords) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// Term weights per document plus the vocabulary naming each column.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    /// Rows are documents in input order, columns follow `vocabulary`.
    /// Raw counts from `fit_transform`, TF-IDF weights from `fit_transform_tfidf`.
    pub counts: Array2<f64>,
    /// Retained terms in lexical order
    pub vocabulary: Vec<String>,
}

impl DocumentTermMatrix {
    pub fn n_documents(&self) -> usize {
        self.counts.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Total occurrences of each vocabulary term across all documents.
    pub fn term_totals(&self) -> Vec<(String, f64)> {
        let totals = self.counts.sum_axis(Axis(0));
        self.vocabulary
            .iter()
            .zip(totals.iter())
            .map(|(term, &total)| (term.clone(), total))
            .collect()
    }
}

/// Count vectorizer with stop-word and document-frequency filtering.
#[derive(Debug, Clone)]
pub struct TermVectorizer {
    pub stop_words: StopWords,
    /// Drop terms that appear in more documents than this
    pub max_doc_frequency: DocFrequency,
    /// Drop terms that appear in fewer documents than this
    pub min_doc_frequency: DocFrequency,
}

impl Default for TermVectorizer {
    /// Keeps every non-stop-word term.
    fn default() -> Self {
        Self {
            stop_words: StopWords::English,
            max_doc_frequency: DocFrequency::Fraction(1.0),
            min_doc_frequency: DocFrequency::Count(1),
        }
    }
}

impl TermVectorizer {
    /// Bounds used ahead of topic modeling: terms must appear in at least two
    /// segments and in no more than 95% of them.
    pub fn for_topic_model() -> Self {
        Self {
            stop_words: StopWords::English,
            max_doc_frequency: DocFrequency::Fraction(0.95),
            min_doc_frequency: DocFrequency::Count(2),
        }
    }

    /// Bounds that contradict each other whatever the corpus size.
    fn bounds_inverted(&self) -> bool {
        match (self.max_doc_frequency, self.min_doc_frequency) {
            (DocFrequency::Count(max), DocFrequency::Count(min)) => max < min,
            (DocFrequency::Fraction(max), DocFrequency::Fraction(min)) => max < min,
            _ => false,
        }
    }

    /// Build the vocabulary from `texts` and count terms per document.
    pub fn fit_transform<S: AsRef<str>>(&self, texts: &[S]) -> Result<DocumentTermMatrix> {
        let documents = texts.len();
        let max_df = self.max_doc_frequency.max_count(documents)?;
        let min_df = self.min_doc_frequency.min_count(documents)?;

        if documents == 0 {
            return Err(ChapterError::EmptyVocabulary {
                documents,
                min_df,
                max_df,
            });
        }
        if self.bounds_inverted() {
            return Err(ChapterError::InvalidConfig(format!(
                "max_df {:?} is below min_df {:?}",
                self.max_doc_frequency, self.min_doc_frequency
            )));
        }
        // A fraction bound can still cross a count bound on a small corpus.
        // That is a corpus too small to keep any term, not a bad setting.
        if max_df < min_df {
            return Err(ChapterError::EmptyVocabulary {
                documents,
                min_df,
                max_df,
            });
        }

        let tokenized: Vec<Vec<String>> = texts
            .iter()
            .map(|t| tokenize(t.as_ref(), self.stop_words))
            .collect();

        let mut doc_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &tokenized {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *doc_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let vocabulary: Vec<String> = doc_frequency
            .iter()
            .filter(|&(_, &df)| df >= min_df && df <= max_df)
            .map(|(term, _)| (*term).to_string())
            .collect();

        if vocabulary.is_empty() {
            return Err(ChapterError::EmptyVocabulary {
                documents,
                min_df,
                max_df,
            });
        }

        let mut counts = Array2::<f64>::zeros((documents, vocabulary.len()));
        {
            let column: HashMap<&str, usize> = vocabulary
                .iter()
                .enumerate()
                .map(|(i, term)| (term.as_str(), i))
                .collect();
            for (row, doc) in tokenized.iter().enumerate() {
                for token in doc {
                    if let Some(&col) = column.get(token.as_str()) {
                        counts[[row, col]] += 1.0;
                    }
                }
            }
        }

        debug!(
            documents,
            candidate_terms = doc_frequency.len(),
            vocabulary = vocabulary.len(),
            "Built document-term matrix"
        );

        Ok(DocumentTermMatrix { counts, vocabulary })
    }

    /// Like `fit_transform`, but weights each count by a smoothed inverse
    /// document frequency, `ln((1 + n) / (1 + df)) + 1`, and scales every
    /// row to unit length.
    pub fn fit_transform_tfidf<S: AsRef<str>>(&self, texts: &[S]) -> Result<DocumentTermMatrix> {
        let mut dtm = self.fit_transform(texts)?;
        let documents = dtm.n_documents() as f64;

        let idf: Vec<f64> = dtm
            .counts
            .columns()
            .into_iter()
            .map(|col| {
                let df = col.iter().filter(|&&v| v > 0.0).count() as f64;
                ((1.0 + documents) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        for mut row in dtm.counts.rows_mut() {
            for (value, weight) in row.iter_mut().zip(&idf) {
                *value *= weight;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        Ok(dtm)
    }
}
