// Colored terminal output for chapter lists, topics and transcript stats.
//
// main.rs delegates all display formatting here.

use colored::Colorize;

use crate::chapters::naming::format_timestamp;
use crate::chapters::NamedChapter;
use crate::stats::TranscriptStats;

/// Display the final chapter list, one `HH:MM:SS - Chapter N: ...` line each.
pub fn display_chapters(chapters: &[NamedChapter]) {
    println!(
        "\n{}",
        format!("=== Chapters ({}) ===", chapters.len()).bold()
    );
    println!();

    for chapter in chapters {
        let name = if chapter.keywords.is_empty() {
            chapter.name.dimmed()
        } else {
            chapter.name.normal()
        };
        println!(
            "  {} - {:<width$} {}",
            chapter.time_label.bright_cyan(),
            name,
            format!("(topic {})", chapter.topic).dimmed(),
            width = label_width(chapters),
        );
    }
    println!();
}

fn label_width(chapters: &[NamedChapter]) -> usize {
    chapters
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
}

/// Display the top terms of every fitted topic.
pub fn display_topics(topic_keywords: &[Vec<String>]) {
    if topic_keywords.is_empty() {
        println!("No topic model was fitted (transcript too short).");
        return;
    }

    println!("\n{}", "=== Identified Topics ===".bold());
    println!();
    for (i, terms) in topic_keywords.iter().enumerate() {
        println!("  Topic {:>2}: {}", i, terms.join(" ").dimmed());
    }
    println!();
}

/// Display the transcript overview and its most common terms.
pub fn display_stats(stats: &TranscriptStats, common: &[(String, usize)]) {
    println!("\n{}", "=== Transcript Overview ===".bold());
    println!();
    println!("  Segments:     {}", stats.segment_count);
    println!(
        "  Time span:    {} .. {}",
        format_timestamp(stats.first_start),
        format_timestamp(stats.last_start)
    );
    println!(
        "  Text length:  min {}  max {}  mean {:.1}",
        stats.min_text_length, stats.max_text_length, stats.mean_text_length
    );

    if common.is_empty() {
        println!("\n  No terms left after stop-word removal.");
        return;
    }

    println!("\n{}", format!("=== Top {} Common Words ===", common.len()).bold());
    println!();
    let max_count = common.first().map_or(1, |(_, c)| (*c).max(1));
    let bar_width: usize = 20;
    for (term, count) in common {
        let filled = (*count * bar_width).div_ceil(max_count);
        println!(
            "  {:<20} {} {}",
            term,
            "=".repeat(filled).bright_green(),
            count
        );
    }
    println!();
}

/// Display terms ranked by TF-IDF across segments.
pub fn display_distinctive_terms(terms: &[(String, f32)]) {
    println!("\n{}", "=== Distinctive Terms ===".bold());
    println!();
    for (i, (term, score)) in terms.iter().enumerate() {
        println!("  {:>2}. {:<20} {:.3}", i + 1, term, score);
    }
    println!();
}
