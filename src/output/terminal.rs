// Colored terminal output for keyword matches, batch summaries and seed lists.
//
// main.rs delegates all terminal formatting here.

use std::path::Path;

use colored::Colorize;

use crate::keywords::matcher::KeywordMatches;
use crate::keywords::seeds::SeedKeywords;
use crate::pipeline::batch::BatchReport;

/// Display the matches extracted from a single transcript.
pub fn display_matches(matches: &KeywordMatches, threshold: f32) {
    if matches.is_empty() {
        println!(
            "No candidate keywords scored above the {threshold:.2} similarity threshold."
        );
        return;
    }

    println!(
        "\n{}",
        format!("=== Keywords ({} matches, threshold {threshold:.2}) ===", matches.len()).bold()
    );
    println!();

    println!(
        "  {:<24} {:>5}  {:>6}  {:<20} {}",
        "Candidate".dimmed(),
        "Freq".dimmed(),
        "Sim".dimmed(),
        "Seed keyword".dimmed(),
        "List".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());

    for m in matches.values() {
        println!(
            "  {:<24} {:>5}  {}  {:<20} {}",
            super::truncate_chars(&m.candidate, 24),
            m.frequency,
            colorize_similarity(m.similarity),
            m.keyword,
            m.source.dimmed(),
        );
    }
    println!();
}

/// Display the outcome of a batch run.
pub fn display_batch_summary(report: &BatchReport, output: &Path) {
    println!("\n{}", "=== Batch Summary ===".bold());
    println!("  Records loaded:     {}", report.records);
    if report.missing > 0 {
        println!(
            "  {} {} records had no text field",
            "Warning:".yellow(),
            report.missing
        );
    }
    println!("  Eligible documents: {}", report.eligible);
    println!("  Processed:          {}", report.processed);
    println!("  With matches:       {}", report.matched_documents);
    println!("  Keyword rows:       {}", report.rows.len());
    println!();
    println!(
        "{}",
        format!("Testing done. Results written to {}", output.display()).bold()
    );
}

/// Display the active seed keyword lists.
pub fn display_seeds(seeds: &SeedKeywords) {
    println!("\n{}", "=== Seed Keywords ===".bold());
    for list in seeds.lists() {
        println!();
        println!(
            "  {} ({} keywords)",
            list.name.bold(),
            list.keywords.len()
        );
        println!("      {}", list.keywords.join(", ").dimmed());
    }
    println!();
}

/// Color a similarity score by strength.
fn colorize_similarity(similarity: f32) -> colored::ColoredString {
    let text = format!("{similarity:>6.3}");
    if similarity >= 0.8 {
        text.bright_green()
    } else if similarity >= 0.6 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}
