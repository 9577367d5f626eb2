// The chapterization pipeline.
//
// transcript -> term matrix -> topic fit -> dominant topics -> boundaries
//   -> consolidated boundaries -> chapters -> named chapters
//
// Each stage takes the previous stage's output as an argument and nothing is
// shared between runs, so the same transcript, config and seed always give
// the same chapters.

use tracing::{debug, info};

use super::boundary::{consolidate_boundaries, detect_boundaries, Boundary};
use super::config::ChapterConfig;
use super::merge::{merge_chapters, Chapter};
use super::naming::{name_chapters, NamedChapter};
use crate::error::{ChapterError, Result};
use crate::topics::dominant::dominant_topics;
use crate::topics::keywords::top_terms_per_topic;
use crate::topics::nmf::NmfModel;
use crate::topics::traits::TopicModel;
use crate::transcript::Segment;

/// Everything a run produced, stage by stage.
#[derive(Debug, Clone)]
pub struct ChapterRun {
    /// Terms kept for the topic model (0 when no model was fitted)
    pub vocabulary_size: usize,
    /// Top terms of each fitted topic
    pub topic_keywords: Vec<Vec<String>>,
    /// One dominant topic per input segment
    pub dominant_topics: Vec<usize>,
    pub boundaries: Vec<Boundary>,
    pub consolidated: Vec<Boundary>,
    pub chapters: Vec<Chapter>,
    pub named: Vec<NamedChapter>,
}

/// Runs the full pipeline with a pluggable topic model.
pub struct Chapterizer {
    config: ChapterConfig,
    model: Box<dyn TopicModel>,
}

impl Chapterizer {
    /// Pipeline backed by the default NMF model.
    pub fn new(config: ChapterConfig) -> Self {
        Self::with_model(config, Box::new(NmfModel::default()))
    }

    pub fn with_model(config: ChapterConfig, model: Box<dyn TopicModel>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &ChapterConfig {
        &self.config
    }

    /// Chapterize `segments`, which must be in non-decreasing start order.
    ///
    /// Vectorization and fit errors abort the run, as does a model whose
    /// weights do not have one row per segment. Transcripts of zero or one
    /// segment skip the topic model and, when anchoring, come back as a single
    /// chapter.
    pub fn run(&self, segments: &[Segment]) -> Result<ChapterRun> {
        self.config.validate()?;

        let (vocabulary_size, topic_keywords, topics) = if segments.len() <= 1 {
            debug!(segments = segments.len(), "Transcript too short to model, using one topic");
            (0, Vec::new(), vec![0; segments.len()])
        } else {
            let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
            let matrix = self.config.vectorizer().fit_transform(&texts)?;
            let fit = self
                .model
                .fit(&matrix, self.config.topic_count, self.config.seed)?;
            if fit.weights.nrows() != segments.len() {
                return Err(ChapterError::Fit {
                    topics: self.config.topic_count,
                    reason: format!(
                        "model returned weights for {} documents, expected {}",
                        fit.weights.nrows(),
                        segments.len()
                    ),
                });
            }
            let topic_keywords =
                top_terms_per_topic(&fit.loadings, &matrix.vocabulary, self.config.topic_terms);
            (matrix.n_terms(), topic_keywords, dominant_topics(&fit.weights))
        };

        let boundaries: Vec<Boundary> = detect_boundaries(segments, &topics).collect();
        let consolidated = consolidate_boundaries(boundaries.iter().copied(), self.config.min_gap_secs);
        debug!(
            raw = boundaries.len(),
            consolidated = consolidated.len(),
            min_gap_secs = self.config.min_gap_secs,
            "Consolidated topic boundaries"
        );

        // Anchored, an empty transcript is one chapter at 0.0. Unanchored it
        // has no boundaries and fails in the merger like any other.
        let chapters = if segments.is_empty() && self.config.anchor_first_chapter {
            vec![Chapter { start: 0.0, topic: 0 }]
        } else {
            merge_chapters(&self.merge_input(segments, &consolidated), segments, &topics)?
        };
        let named = name_chapters(&chapters, segments, &topics, &self.config);

        info!(
            segments = segments.len(),
            vocabulary = vocabulary_size,
            chapters = named.len(),
            "Chapterized transcript"
        );

        Ok(ChapterRun {
            vocabulary_size,
            topic_keywords,
            dominant_topics: topics,
            boundaries,
            consolidated,
            chapters,
            named,
        })
    }

    /// Boundaries handed to the merger: the consolidated ones, preceded by
    /// the transcript start when anchoring is on.
    fn merge_input(&self, segments: &[Segment], consolidated: &[Boundary]) -> Vec<Boundary> {
        if !self.config.anchor_first_chapter {
            return consolidated.to_vec();
        }
        let Some(start) = segments.first().map(|s| s.start) else {
            return consolidated.to_vec();
        };
        let mut input = Vec::with_capacity(consolidated.len() + 1);
        input.push(Boundary { index: 0, start });
        input.extend(consolidated.iter().filter(|b| b.start > start).copied());
        input
    }
}

/// Chapterize a transcript with the default topic model.
pub fn chapterize(segments: &[Segment], config: &ChapterConfig) -> Result<Vec<NamedChapter>> {
    Chapterizer::new(config.clone()).run(segments).map(|run| run.named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::traits::TopicFit;
    use crate::topics::vectorizer::DocumentTermMatrix;
    use ndarray::Array2;

    /// Model that forgets the last document.
    struct ShortModel;

    impl TopicModel for ShortModel {
        fn fit(&self, matrix: &DocumentTermMatrix, k: usize, _seed: u64) -> Result<TopicFit> {
            Ok(TopicFit {
                weights: Array2::zeros((matrix.n_documents() - 1, k)),
                loadings: Array2::zeros((k, matrix.n_terms())),
            })
        }
    }

    #[test]
    fn test_single_segment_is_one_chapter() {
        let segments = vec![Segment::new(12.0, "garden soil compost")];
        let run = Chapterizer::new(ChapterConfig::default()).run(&segments).unwrap();
        assert!(run.boundaries.is_empty());
        assert_eq!(run.dominant_topics, vec![0]);
        assert_eq!(run.chapters, vec![Chapter { start: 12.0, topic: 0 }]);
        assert_eq!(run.named[0].name, "Chapter 1: compost garden soil");
    }

    #[test]
    fn test_empty_transcript_is_one_empty_chapter() {
        let run = Chapterizer::new(ChapterConfig::default()).run(&[]).unwrap();
        assert_eq!(run.named.len(), 1);
        assert_eq!(run.named[0].time_label, "00:00:00");
        assert!(run.named[0].keywords.is_empty());
    }

    #[test]
    fn test_invalid_config_aborts() {
        let config = ChapterConfig {
            min_gap_secs: -1.0,
            ..ChapterConfig::default()
        };
        let err = Chapterizer::new(config).run(&[]).unwrap_err();
        assert!(matches!(err, ChapterError::InvalidConfig(_)));
    }

    #[test]
    fn test_unanchored_single_segment_has_no_chapters() {
        let config = ChapterConfig {
            anchor_first_chapter: false,
            ..ChapterConfig::default()
        };
        let segments = vec![Segment::new(0.0, "garden soil")];
        let err = Chapterizer::new(config).run(&segments).unwrap_err();
        assert_eq!(err, ChapterError::NoChapters);
    }

    #[test]
    fn test_too_many_topics_is_fatal() {
        let segments = vec![
            Segment::new(0.0, "garden soil"),
            Segment::new(5.0, "garden compost"),
            Segment::new(9.0, "soil compost"),
        ];
        let err = chapterize(&segments, &ChapterConfig::default()).unwrap_err();
        assert!(matches!(err, ChapterError::Fit { topics: 10, .. }));
    }

    #[test]
    fn test_unanchored_empty_transcript_has_no_chapters() {
        let config = ChapterConfig {
            anchor_first_chapter: false,
            ..ChapterConfig::default()
        };
        let err = Chapterizer::new(config).run(&[]).unwrap_err();
        assert_eq!(err, ChapterError::NoChapters);
    }

    #[test]
    fn test_model_row_count_must_match_segments() {
        let config = ChapterConfig {
            topic_count: 1,
            ..ChapterConfig::default()
        };
        let segments = vec![
            Segment::new(0.0, "garden soil"),
            Segment::new(5.0, "garden soil"),
            Segment::new(9.0, "soil compost"),
        ];
        let err = Chapterizer::with_model(config, Box::new(ShortModel))
            .run(&segments)
            .unwrap_err();
        assert!(matches!(err, ChapterError::Fit { topics: 1, .. }));
    }
}
