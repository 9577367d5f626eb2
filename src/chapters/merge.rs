// Fold consolidated boundaries into chapters.
//
// Consolidation can leave consecutive boundaries that land on the same topic
// (A -> B -> A with the B stretch filtered out). Those are absorbed into the
// running chapter so that no two neighbouring chapters share a topic.

use serde::Serialize;

use super::boundary::Boundary;
use crate::error::{ChapterError, Result};
use crate::transcript::Segment;

/// A chapter before naming: where it starts and which topic it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chapter {
    pub start: f64,
    pub topic: usize,
}

/// Dominant topic of the first segment starting exactly at `start`.
pub fn topic_at(start: f64, segments: &[Segment], topics: &[usize]) -> Option<usize> {
    segments
        .iter()
        .position(|s| s.start == start)
        .and_then(|i| topics.get(i).copied())
}

/// Merge consolidated boundaries into chapters in ascending time order.
///
/// The first chapter opens at the first boundary with the first segment's
/// topic. Later boundaries look up their topic by start time; a boundary whose
/// topic matches the running chapter is absorbed, any other closes it.
///
/// Fails with `NoChapters` when there are no boundaries (or no topics) to seed
/// from, and with `UnmatchedBoundary` when a boundary start matches no
/// segment.
pub fn merge_chapters(
    boundaries: &[Boundary],
    segments: &[Segment],
    topics: &[usize],
) -> Result<Vec<Chapter>> {
    let (first, rest) = boundaries.split_first().ok_or(ChapterError::NoChapters)?;
    let seed_topic = *topics.first().ok_or(ChapterError::NoChapters)?;

    let mut chapters = Vec::new();
    let mut current = Chapter {
        start: first.start,
        topic: seed_topic,
    };

    for boundary in rest {
        let topic = topic_at(boundary.start, segments, topics).ok_or(
            ChapterError::UnmatchedBoundary {
                start: boundary.start,
            },
        )?;
        if topic != current.topic {
            chapters.push(current);
            current = Chapter {
                start: boundary.start,
                topic,
            };
        }
    }
    chapters.push(current);

    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::boundary::{consolidate_boundaries, detect_boundaries};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn segments_at(starts: &[f64]) -> Vec<Segment> {
        starts.iter().map(|&s| Segment::new(s, "text")).collect()
    }

    fn boundary(index: usize, start: f64) -> Boundary {
        Boundary { index, start }
    }

    #[test]
    fn test_empty_boundaries_is_no_chapters() {
        let segments = segments_at(&[0.0, 10.0]);
        assert_eq!(
            merge_chapters(&[], &segments, &[0, 0]),
            Err(ChapterError::NoChapters)
        );
    }

    #[test]
    fn test_seed_uses_first_segment_topic() {
        // Reference behavior: the seed topic is segment 0's, not the boundary's.
        let segments = segments_at(&[0.0, 20.0, 150.0]);
        let topics = [1, 2, 3];
        let chapters = merge_chapters(&[boundary(1, 20.0), boundary(2, 150.0)], &segments, &topics).unwrap();
        assert_eq!(
            chapters,
            vec![
                Chapter { start: 20.0, topic: 1 },
                Chapter { start: 150.0, topic: 3 },
            ]
        );
    }

    #[test]
    fn test_same_topic_is_absorbed() {
        let segments = segments_at(&[0.0, 70.0, 140.0, 210.0]);
        let topics = [0, 1, 0, 0];
        let boundaries = [boundary(0, 0.0), boundary(2, 140.0), boundary(3, 210.0)];
        let chapters = merge_chapters(&boundaries, &segments, &topics).unwrap();
        assert_eq!(chapters, vec![Chapter { start: 0.0, topic: 0 }]);
    }

    #[test]
    fn test_lookup_takes_first_segment_with_start() {
        let segments = segments_at(&[0.0, 80.0, 80.0]);
        let topics = [0, 4, 5];
        assert_eq!(topic_at(80.0, &segments, &topics), Some(4));
        let chapters = merge_chapters(&[boundary(0, 0.0), boundary(2, 80.0)], &segments, &topics).unwrap();
        assert_eq!(chapters[1], Chapter { start: 80.0, topic: 4 });
    }

    #[test]
    fn test_unmatched_boundary_fails() {
        let segments = segments_at(&[0.0, 10.0]);
        let err = merge_chapters(&[boundary(0, 0.0), boundary(1, 99.0)], &segments, &[0, 1]).unwrap_err();
        assert_eq!(err, ChapterError::UnmatchedBoundary { start: 99.0 });
    }

    #[test]
    fn test_no_equal_neighbours_over_random_sequences() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let len: usize = rng.random_range(1..60);
            let topics: Vec<usize> = (0..len).map(|_| rng.random_range(0..4)).collect();
            let mut start: f64 = 0.0;
            let segments: Vec<Segment> = (0..len)
                .map(|_| {
                    start += rng.random_range(1.0..40.0);
                    Segment::new(start, "text")
                })
                .collect();

            let mut boundaries = vec![boundary(0, segments[0].start)];
            boundaries.extend(consolidate_boundaries(detect_boundaries(&segments, &topics), 60.0));

            let chapters = merge_chapters(&boundaries, &segments, &topics).unwrap();
            for pair in chapters.windows(2) {
                assert_ne!(pair[0].topic, pair[1].topic, "adjacent chapters share a topic: {chapters:?}");
                assert!(pair[0].start < pair[1].start);
            }
        }
    }
}
