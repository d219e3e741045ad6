use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use seedword::config::Config;
use seedword::corpus::loader::{load_corpus, read_transcript};
use seedword::keywords::generator::keyword_generator;
use seedword::nlp::engine::VectorEngine;
use seedword::nlp::stopwords::StopWords;
use seedword::output::{csv, terminal};
use seedword::pipeline::batch::{run_batch, KeywordRow, KEYWORD_COLUMNS};

/// seedword: find the words in a transcript that sit near your seed keywords.
///
/// Candidate words are lemmatized, counted, and compared with a seed keyword
/// list through word-vector cosine similarity.
#[derive(Parser)]
#[command(name = "seedword", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract keywords from a sample of corpus documents and write them to CSV
    Batch {
        /// Line-delimited JSON corpus (gzip or plain)
        corpus: PathBuf,

        /// Output CSV path (default: keyword.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Similarity threshold (default: 0.5)
        #[arg(long)]
        threshold: Option<f32>,

        /// Max documents to process (default: 100)
        #[arg(long)]
        sample_size: Option<usize>,

        /// Documents need more than this many words (default: 40)
        #[arg(long)]
        min_words: Option<usize>,

        /// Record field holding the text (default: reviewText)
        #[arg(long)]
        field: Option<String>,
    },

    /// Extract keywords from a single transcript file
    Extract {
        /// Plain-text transcript
        transcript: PathBuf,

        /// Similarity threshold (default: 0.5)
        #[arg(long)]
        threshold: Option<f32>,

        /// Also write the matches to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the active seed keyword lists
    Seeds,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seedword=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Batch {
            corpus,
            output,
            threshold,
            sample_size,
            min_words,
            field,
        } => {
            let mut config = Config::load()?;
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(sample_size) = sample_size {
                config.sample_size = sample_size;
            }
            if let Some(min_words) = min_words {
                config.min_words = min_words;
            }
            if let Some(field) = field {
                config.text_field = field;
            }
            config.validate()?;
            config.require_vectors()?;

            let seeds = config.seeds()?;
            println!("Loading word vectors from {}...", config.vectors_path.display());
            let engine = load_engine(&config)?;

            println!("Loading corpus {}...", corpus.display());
            let corpus = load_corpus(&corpus)?;

            let report = run_batch(
                &engine,
                &corpus,
                &seeds,
                &StopWords::english(),
                &config.batch_options(),
            )?;

            csv::write_rows(&config.output_path, &report.rows, &KEYWORD_COLUMNS)?;
            terminal::display_batch_summary(&report, &config.output_path);
        }

        Commands::Extract {
            transcript,
            threshold,
            output,
        } => {
            let mut config = Config::load()?;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            config.validate()?;
            config.require_vectors()?;

            let seeds = config.seeds()?;
            let engine = load_engine(&config)?;
            let text = read_transcript(&transcript, true)?;

            let options = config.match_options();
            let matches = keyword_generator(
                &engine,
                &text,
                &seeds.lists(),
                &StopWords::english(),
                &options,
            );
            info!(matches = matches.len(), "Extracted keywords from transcript");
            terminal::display_matches(&matches, options.threshold);

            if let Some(path) = output {
                let rows: Vec<KeywordRow> = matches
                    .into_values()
                    .map(|m| KeywordRow::from_match(0, m))
                    .collect();
                csv::write_rows(&path, &rows, &KEYWORD_COLUMNS)?;
                println!("{}", format!("Matches written to {}", path.display()).bold());
            }
        }

        Commands::Seeds => {
            let config = Config::load()?;
            let seeds = config.seeds()?;
            terminal::display_seeds(&seeds);
            if config.seeds_path.is_none() {
                println!(
                    "{}",
                    "Using built-in lists. Set SEEDWORD_SEEDS to a JSON file to replace them."
                        .dimmed()
                );
            }
        }
    }

    Ok(())
}

fn load_engine(config: &Config) -> Result<VectorEngine> {
    VectorEngine::load(
        &config.vectors_path,
        config.vector_limit,
        config.lemma_table(),
    )
}
