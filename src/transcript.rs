// Transcript input: timestamped text segments.
//
// Acquiring a transcript is someone else's job. This module only defines the
// segment record the pipeline consumes and a loader for transcripts that were
// already saved as JSON (`[{"start": 0.0, "text": "..."}, ...]`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One timestamped unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Offset from the start of the recording, in seconds
    pub start: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// Load a transcript from a JSON file.
///
/// Segments must have finite, non-decreasing start offsets. Segments with
/// blank text are dropped with a warning.
pub fn load_transcript(path: &Path) -> Result<Vec<Segment>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    let segments = parse_transcript(&raw)
        .with_context(|| format!("Invalid transcript in {}", path.display()))?;
    info!(
        path = %path.display(),
        segments = segments.len(),
        "Loaded transcript"
    );
    Ok(segments)
}

/// Parse and validate a JSON transcript.
pub fn parse_transcript(json: &str) -> Result<Vec<Segment>> {
    let parsed: Vec<Segment> =
        serde_json::from_str(json).context("Transcript must be a JSON array of {start, text}")?;

    let mut segments = Vec::with_capacity(parsed.len());
    let mut previous_start = f64::NEG_INFINITY;

    for (i, segment) in parsed.into_iter().enumerate() {
        if !segment.start.is_finite() {
            anyhow::bail!("Segment {i} has a non-finite start offset");
        }
        if segment.start < previous_start {
            anyhow::bail!(
                "Segment {i} starts at {}s, before the previous segment ({}s)",
                segment.start,
                previous_start
            );
        }
        previous_start = segment.start;

        if segment.text.trim().is_empty() {
            warn!(index = i, start = segment.start, "Skipping segment with blank text");
            continue;
        }
        segments.push(segment);
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let json = r#"[{"start": 0.0, "text": "hello there"}, {"start": 4.5, "text": "welcome back"}]"#;
        let segments = parse_transcript(json).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], Segment::new(4.5, "welcome back"));
    }

    #[test]
    fn test_parse_skips_blank_text() {
        let json = r#"[{"start": 0.0, "text": "  "}, {"start": 1.0, "text": "music"}]"#;
        let segments = parse_transcript(json).unwrap();
        assert_eq!(segments, vec![Segment::new(1.0, "music")]);
    }

    #[test]
    fn test_parse_rejects_decreasing_starts() {
        let json = r#"[{"start": 10.0, "text": "a b"}, {"start": 5.0, "text": "c d"}]"#;
        assert!(parse_transcript(json).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_transcript(r#"{"start": 0.0}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        std::fs::write(&path, r#"[{"start": 2.0, "text": "intro"}]"#).unwrap();
        let segments = load_transcript(&path).unwrap();
        assert_eq!(segments, vec![Segment::new(2.0, "intro")]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_transcript(Path::new("/nonexistent/transcript.json")).is_err());
    }
}
