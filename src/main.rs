use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use chapterize::chapters::{Chapterizer, GatherScope};
use chapterize::config::Config;
use chapterize::output::terminal;
use chapterize::stats::{common_terms, distinctive_terms, TranscriptStats};
use chapterize::transcript::load_transcript;

/// Chapterize: topic-based chapter detection for timestamped transcripts.
///
/// Reads a transcript saved as a JSON array of {"start": seconds, "text": ...}
/// records and splits it into chapters named after their dominant keywords.
#[derive(Parser)]
#[command(name = "chapterize", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a transcript into named chapters
    Chapters {
        /// Transcript JSON file
        file: PathBuf,

        /// Number of topics to fit (default: CHAPTERIZE_TOPICS or 10)
        #[arg(long)]
        topics: Option<usize>,

        /// Minimum seconds between chapters (default: CHAPTERIZE_THRESHOLD_SECS or 60)
        #[arg(long)]
        threshold: Option<f64>,

        /// Topic model seed (default: CHAPTERIZE_SEED or 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Keywords per chapter name (default: CHAPTERIZE_NAME_TERMS or 3)
        #[arg(long)]
        name_terms: Option<usize>,

        /// Name chapters only from their own time span
        #[arg(long)]
        bounded_gather: bool,

        /// Print chapters as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also list the top terms of every fitted topic
        #[arg(long)]
        show_topics: bool,
    },

    /// Show transcript statistics and its most common words
    Stats {
        /// Transcript JSON file
        file: PathBuf,

        /// How many common words to list
        #[arg(long, default_value = "20")]
        top: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chapterize=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chapters {
            file,
            topics,
            threshold,
            seed,
            name_terms,
            bounded_gather,
            json,
            show_topics,
        } => {
            let config = Config::load()?;
            let mut chapter_config = config.chapter_config();
            if let Some(topics) = topics {
                chapter_config.topic_count = topics;
            }
            if let Some(threshold) = threshold {
                chapter_config.min_gap_secs = threshold;
            }
            if let Some(seed) = seed {
                chapter_config.seed = seed;
            }
            if let Some(name_terms) = name_terms {
                chapter_config.name_terms = name_terms;
            }
            if bounded_gather {
                chapter_config.gather = GatherScope::Bounded;
            }

            let segments = load_transcript(&file)?;
            info!(
                topics = chapter_config.topic_count,
                threshold = chapter_config.min_gap_secs,
                seed = chapter_config.seed,
                "Chapterizing transcript"
            );

            let run = Chapterizer::new(chapter_config)
                .run(&segments)
                .with_context(|| format!("Failed to chapterize {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&run.named)?);
                return Ok(());
            }

            if show_topics {
                terminal::display_topics(&run.topic_keywords);
            }
            terminal::display_chapters(&run.named);
            println!(
                "{}",
                format!(
                    "{} topic changes, {} after consolidation.",
                    run.boundaries.len(),
                    run.consolidated.len()
                )
                .dimmed()
            );
        }

        Commands::Stats { file, top } => {
            let segments = load_transcript(&file)?;
            let stats = TranscriptStats::compute(&segments);
            let common = common_terms(&segments, top);
            terminal::display_stats(&stats, &common);

            match distinctive_terms(&segments, top) {
                Ok(terms) => terminal::display_distinctive_terms(&terms),
                Err(e) => println!("{}", format!("Distinctive terms unavailable: {e}").dimmed()),
            }
        }
    }

    Ok(())
}
