// Chapter construction: boundaries, merging, naming, and the pipeline that
// strings them together.

pub mod boundary;
pub mod config;
pub mod merge;
pub mod naming;
pub mod pipeline;

pub use config::{ChapterConfig, GatherScope};
pub use naming::NamedChapter;
pub use pipeline::{chapterize, ChapterRun, Chapterizer};
