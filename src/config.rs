use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::chapters::ChapterConfig;

/// CLI defaults loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every value
/// is optional; command-line flags override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Topics to fit (CHAPTERIZE_TOPICS, default 10)
    pub topic_count: usize,
    /// Minimum spacing between chapters in seconds (CHAPTERIZE_THRESHOLD_SECS, default 60)
    pub threshold_secs: f64,
    /// Topic model seed (CHAPTERIZE_SEED, default 42)
    pub seed: u64,
    /// Keywords per chapter name (CHAPTERIZE_NAME_TERMS, default 3)
    pub name_terms: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = ChapterConfig::default();
        Ok(Self {
            topic_count: parse_var("CHAPTERIZE_TOPICS", defaults.topic_count)?,
            threshold_secs: parse_var("CHAPTERIZE_THRESHOLD_SECS", defaults.min_gap_secs)?,
            seed: parse_var("CHAPTERIZE_SEED", defaults.seed)?,
            name_terms: parse_var("CHAPTERIZE_NAME_TERMS", defaults.name_terms)?,
        })
    }

    /// Pipeline settings seeded from this configuration.
    pub fn chapter_config(&self) -> ChapterConfig {
        ChapterConfig {
            topic_count: self.topic_count,
            seed: self.seed,
            min_gap_secs: self.threshold_secs,
            name_terms: self.name_terms,
            ..ChapterConfig::default()
        }
    }
}

/// Read `name` from the environment, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
