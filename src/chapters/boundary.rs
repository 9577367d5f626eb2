// Topic-change boundaries and their consolidation.
//
// A boundary sits at the start of every segment whose dominant topic differs
// from the segment before it. Raw boundaries are far too dense to be chapter
// breaks (topic models flicker between neighbouring segments), so they are
// thinned with a greedy minimum-gap filter.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::transcript::Segment;

/// A point where the dominant topic changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    /// Index of the first segment with the new topic
    pub index: usize,
    /// That segment's start offset, in seconds
    pub start: f64,
}

/// Lazy scan over a dominant-topic sequence. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Boundaries<'a> {
    segments: &'a [Segment],
    topics: &'a [usize],
    next: usize,
}

impl Iterator for Boundaries<'_> {
    type Item = Boundary;

    fn next(&mut self) -> Option<Boundary> {
        let len = self.segments.len().min(self.topics.len());
        while self.next < len {
            let i = self.next;
            self.next += 1;
            if self.topics[i] != self.topics[i - 1] {
                return Some(Boundary {
                    index: i,
                    start: self.segments[i].start,
                });
            }
        }
        None
    }
}

impl FusedIterator for Boundaries<'_> {}

/// Boundaries where `topics[i] != topics[i - 1]`, in segment order.
///
/// `topics` holds one dominant topic per segment. The first segment never
/// produces a boundary, so transcripts of zero or one segment yield nothing.
pub fn detect_boundaries<'a>(segments: &'a [Segment], topics: &'a [usize]) -> Boundaries<'a> {
    Boundaries {
        segments,
        topics,
        next: 1,
    }
}

/// Greedily keep boundaries at least `min_gap_secs` after the last kept one.
///
/// The first boundary is always kept. There is no lookahead: a kept boundary
/// may be followed closely by one that is dropped even if that one would have
/// spaced better against later boundaries.
pub fn consolidate_boundaries<I>(boundaries: I, min_gap_secs: f64) -> Vec<Boundary>
where
    I: IntoIterator<Item = Boundary>,
{
    let mut kept: Vec<Boundary> = Vec::new();
    for boundary in boundaries {
        match kept.last() {
            Some(last) if boundary.start - last.start < min_gap_secs => {}
            _ => kept.push(boundary),
        }
    }
    kept
}
