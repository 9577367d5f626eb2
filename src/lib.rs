// Chapterize: topic-based chapter detection for timestamped transcripts.
//
// This is the library root. `topics` turns segment text into per-segment
// topics, `chapters` turns topic changes into named chapters, and the
// remaining modules are input, output and configuration glue for the CLI.

pub mod chapters;
pub mod config;
pub mod error;
pub mod output;
pub mod stats;
pub mod topics;
pub mod transcript;

pub use chapters::{chapterize, ChapterConfig, ChapterRun, Chapterizer, NamedChapter};
pub use error::{ChapterError, Result};
pub use transcript::Segment;
