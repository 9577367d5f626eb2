use crate::error::{ChapterError, Result};
use crate::topics::vectorizer::{DocFrequency, StopWords, TermVectorizer};

/// Which segments contribute text when naming a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatherScope {
    /// Every segment from the chapter start to the end of the transcript
    /// that shares the chapter's topic, including segments that belong to
    /// later chapters.
    #[default]
    Unbounded,
    /// Only segments in `[chapter.start, next_chapter.start)` that share the
    /// chapter's topic.
    Bounded,
}

/// Tunables for a chapterization run.
#[derive(Debug, Clone)]
pub struct ChapterConfig {
    /// Number of topics to fit
    pub topic_count: usize,
    /// Seed for the topic model initializer
    pub seed: u64,
    /// Minimum spacing between retained chapter boundaries, in seconds
    pub min_gap_secs: f64,
    /// Keywords per chapter name
    pub name_terms: usize,
    /// Keywords listed per fitted topic
    pub topic_terms: usize,

    /// Document-frequency bounds for the topic-model vocabulary
    pub max_doc_frequency: DocFrequency,
    pub min_doc_frequency: DocFrequency,

    pub gather: GatherScope,
    /// Open the first chapter at the start of the transcript rather than at
    /// the first retained boundary
    pub anchor_first_chapter: bool,
}

impl Default for ChapterConfig {
    fn default() -> Self {
        Self {
            topic_count: 10,
            seed: 42,
            min_gap_secs: 60.0,
            name_terms: 3,
            topic_terms: 10,
            max_doc_frequency: DocFrequency::Fraction(0.95),
            min_doc_frequency: DocFrequency::Count(2),
            gather: GatherScope::Unbounded,
            anchor_first_chapter: true,
        }
    }
}

impl ChapterConfig {
    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.topic_count == 0 {
            return Err(ChapterError::InvalidConfig(
                "topic count must be at least 1".to_string(),
            ));
        }
        // A zero gap would let boundaries with equal starts both survive.
        if !(self.min_gap_secs.is_finite() && self.min_gap_secs > 0.0) {
            return Err(ChapterError::InvalidConfig(format!(
                "minimum chapter gap must be a positive number of seconds, got {}",
                self.min_gap_secs
            )));
        }
        if self.name_terms == 0 {
            return Err(ChapterError::InvalidConfig(
                "chapter names need at least one keyword".to_string(),
            ));
        }
        Ok(())
    }

    /// The vectorizer that feeds the topic model.
    pub fn vectorizer(&self) -> TermVectorizer {
        TermVectorizer {
            stop_words: StopWords::English,
            max_doc_frequency: self.max_doc_frequency,
            min_doc_frequency: self.min_doc_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ChapterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_gap_rejected() {
        let config = ChapterConfig {
            min_gap_secs: 0.0,
            ..ChapterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChapterError::InvalidConfig(_))));
    }

    #[test]
    fn test_nan_gap_rejected() {
        let config = ChapterConfig {
            min_gap_secs: f64::NAN,
            ..ChapterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_topics_rejected() {
        let config = ChapterConfig {
            topic_count: 0,
            ..ChapterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
