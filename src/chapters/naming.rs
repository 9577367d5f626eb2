// Chapter naming: keyphrases from each chapter's text plus a time label.
//
// Every chapter gets a fresh TF-IDF vectorizer over its own gathered text, so
// vocabularies are independent between chapters. With a single document the
// IDF factor is the same for every term and the ranking reduces to term
// frequency; ties fall back to lexical order, which keeps names stable
// between runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::config::{ChapterConfig, GatherScope};
use super::merge::Chapter;
use crate::error::{ChapterError, Result};
use crate::topics::vectorizer::TermVectorizer;
use crate::transcript::Segment;

/// A finished chapter, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedChapter {
    pub start: f64,
    pub topic: usize,
    /// `HH:MM:SS` rendering of `start`
    pub time_label: String,
    /// `Chapter N: keyword keyword keyword`
    pub name: String,
    pub keywords: Vec<String>,
}

/// Render an offset in seconds as `HH:MM:SS`.
///
/// Fractional seconds are truncated. Offsets of a day or more wrap around.
pub fn format_timestamp(seconds: f64) -> String {
    let millis = (seconds * 1000.0).floor() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .format("%H:%M:%S")
        .to_string()
}

/// Text of the segments that describe `chapter`, joined with spaces.
///
/// A segment contributes when it starts at or after the chapter, shares the
/// chapter's topic, and (when `end` is given) starts before `end`.
pub fn gather_chapter_text(
    chapter: &Chapter,
    end: Option<f64>,
    segments: &[Segment],
    topics: &[usize],
) -> String {
    segments
        .iter()
        .zip(topics)
        .filter(|&(segment, &topic)| {
            segment.start >= chapter.start
                && topic == chapter.topic
                && end.is_none_or(|end| segment.start < end)
        })
        .map(|(segment, _)| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `top_n` most important terms of `text`, most important first.
///
/// Fails with `EmptyChapterText` when nothing survives stop-word removal.
pub fn chapter_keywords(text: &str, top_n: usize) -> Result<Vec<String>> {
    let dtm = match TermVectorizer::default().fit_transform_tfidf(&[text]) {
        Ok(dtm) => dtm,
        Err(ChapterError::EmptyVocabulary { .. }) => return Err(ChapterError::EmptyChapterText),
        Err(e) => return Err(e),
    };

    // Vocabulary is lexical and the sort is stable, so ties stay lexical.
    let mut ranked: Vec<(&String, f64)> = dtm
        .vocabulary
        .iter()
        .zip(dtm.counts.row(0).iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(term, _)| term.clone())
        .collect())
}

/// Display name for the chapter at 1-based position `ordinal`.
pub fn chapter_name(ordinal: usize, keywords: &[String]) -> String {
    if keywords.is_empty() {
        format!("Chapter {ordinal}:")
    } else {
        format!("Chapter {ordinal}: {}", keywords.join(" "))
    }
}

/// Name every chapter. Chapters with no usable text get an empty keyword
/// list rather than failing the run.
pub fn name_chapters(
    chapters: &[Chapter],
    segments: &[Segment],
    topics: &[usize],
    config: &ChapterConfig,
) -> Vec<NamedChapter> {
    chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let end = match config.gather {
                GatherScope::Unbounded => None,
                GatherScope::Bounded => chapters.get(i + 1).map(|next| next.start),
            };
            let text = gather_chapter_text(chapter, end, segments, topics);

            let keywords = match chapter_keywords(&text, config.name_terms) {
                Ok(keywords) => keywords,
                Err(e) => {
                    warn!(
                        chapter = i + 1,
                        start = chapter.start,
                        topic = chapter.topic,
                        error = %e,
                        "Chapter has no nameable text"
                    );
                    Vec::new()
                }
            };

            NamedChapter {
                start: chapter.start,
                topic: chapter.topic,
                time_label: format_timestamp(chapter.start),
                name: chapter_name(i + 1, &keywords),
                keywords,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
        assert_eq!(format_timestamp(59.99), "00:00:59");
        assert_eq!(format_timestamp(3725.4), "01:02:05");
    }

    #[test]
    fn test_format_timestamp_wraps_at_a_day() {
        assert_eq!(format_timestamp(90_000.0), "01:00:00");
    }

    #[test]
    fn test_keywords_ranked_by_frequency_then_lexically() {
        let text = "rust rust rust borrow borrow tokio compiler";
        let keywords = chapter_keywords(text, 3).unwrap();
        assert_eq!(keywords, vec!["rust", "borrow", "compiler"]);
    }

    #[test]
    fn test_keywords_are_deterministic() {
        let text = "soil compost garden soil seeds garden watering soil";
        let first = chapter_keywords(text, 3).unwrap();
        for _ in 0..10 {
            assert_eq!(chapter_keywords(text, 3).unwrap(), first);
        }
    }

    #[test]
    fn test_stop_word_only_text_is_empty_chapter_text() {
        assert_eq!(
            chapter_keywords("the and of", 3),
            Err(ChapterError::EmptyChapterText)
        );
        assert_eq!(chapter_keywords("", 3), Err(ChapterError::EmptyChapterText));
    }

    #[test]
    fn test_chapter_name_format() {
        let keywords = vec!["garden".to_string(), "soil".to_string()];
        assert_eq!(chapter_name(2, &keywords), "Chapter 2: garden soil");
        assert_eq!(chapter_name(5, &[]), "Chapter 5:");
    }

    #[test]
    fn test_unbounded_gather_includes_later_chapters() {
        let segments = vec![
            Segment::new(0.0, "alpha"),
            Segment::new(70.0, "beta"),
            Segment::new(140.0, "gamma"),
        ];
        let topics = [0, 1, 0];
        let chapter = Chapter { start: 0.0, topic: 0 };
        assert_eq!(gather_chapter_text(&chapter, None, &segments, &topics), "alpha gamma");
        assert_eq!(gather_chapter_text(&chapter, Some(70.0), &segments, &topics), "alpha");
    }

    #[test]
    fn test_name_chapters_recovers_empty_text() {
        let segments = vec![Segment::new(0.0, "the and of"), Segment::new(80.0, "garden soil")];
        let topics = [0, 1];
        let chapters = [Chapter { start: 0.0, topic: 0 }, Chapter { start: 80.0, topic: 1 }];
        let named = name_chapters(&chapters, &segments, &topics, &ChapterConfig::default());
        assert_eq!(named.len(), 2);
        assert!(named[0].keywords.is_empty());
        assert_eq!(named[0].name, "Chapter 1:");
        assert_eq!(named[1].name, "Chapter 2: garden soil");
        assert_eq!(named[1].time_label, "00:01:20");
    }
}
