// Error types for the chapterization pipeline.
//
// Vectorization, fit and configuration errors abort a run. EmptyChapterText
// is recovered inside the naming stage and only surfaces from the
// single-chapter helpers.

use thiserror::Error;

/// Errors produced by the chapterization pipeline, organized by stage.
#[derive(Debug, Error, PartialEq)]
pub enum ChapterError {
    /// Frequency filtering left no usable terms
    #[error("vocabulary is empty after filtering {documents} documents (min_df {min_df}, max_df {max_df})")]
    EmptyVocabulary {
        documents: usize,
        min_df: usize,
        max_df: usize,
    },

    /// Topic count is infeasible for the corpus
    #[error("cannot fit {topics} topics: {reason}")]
    Fit { topics: usize, reason: String },

    /// No boundaries to seed chapter construction
    #[error("no chapter boundaries to build chapters from")]
    NoChapters,

    /// Chapter text is empty once stop words are removed
    #[error("chapter text has no usable terms")]
    EmptyChapterText,

    /// A boundary start does not match any segment start
    #[error("boundary at {start}s does not match any segment start")]
    UnmatchedBoundary { start: f64 },

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ChapterError>;
