// Batch driver: sample long documents from a corpus and extract keywords
// from each.
//
// Only documents with more than `min_words` whitespace-separated words are
// eligible; the first `sample_size` of those, in corpus order, are processed.
// Every match from every document lands in one flat table of KeywordRows.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::loader::Corpus;
use crate::keywords::generator::keyword_generator;
use crate::keywords::matcher::{KeywordMatch, MatchOptions};
use crate::keywords::seeds::SeedKeywords;
use crate::nlp::stopwords::StopWords;
use crate::nlp::traits::LanguageEngine;

pub const DEFAULT_TEXT_FIELD: &str = "reviewText";
pub const DEFAULT_MIN_WORDS: usize = 40;
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// What to do with a record that lacks the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Log a warning and leave the record out of the sample
    #[default]
    Skip,
    /// Fail the batch run
    Abort,
}

impl FromStr for MissingFieldPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => {
                anyhow::bail!("unknown missing-field policy {other:?} (expected \"skip\" or \"abort\")")
            }
        }
    }
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub text_field: String,
    /// A document must have strictly more words than this
    pub min_words: usize,
    pub sample_size: usize,
    pub missing_field: MissingFieldPolicy,
    pub matching: MatchOptions,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            min_words: DEFAULT_MIN_WORDS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            missing_field: MissingFieldPolicy::default(),
            matching: MatchOptions::default(),
            show_progress: false,
        }
    }
}

/// CSV header, in [`KeywordRow`] field order.
pub const KEYWORD_COLUMNS: [&str; 6] = [
    "Candidate Keyword",
    "Similarity Keyword",
    "Source Keyword",
    "Frequency",
    "Seed List",
    "Document",
];

/// One output row: a match plus the document it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRow {
    pub candidate: String,
    /// Cosine similarity between candidate and seed keyword
    pub similarity: f32,
    /// The seed keyword the candidate matched
    pub keyword: String,
    pub frequency: u32,
    pub seed_list: String,
    pub document: usize,
}

impl KeywordRow {
    pub fn from_match(document: usize, m: KeywordMatch) -> Self {
        Self {
            candidate: m.candidate,
            similarity: m.similarity,
            keyword: m.keyword,
            frequency: m.frequency,
            seed_list: m.source,
            document,
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Records in the corpus
    pub records: usize,
    /// Records skipped for lacking the text field
    pub missing: usize,
    /// Documents long enough to be sampled
    pub eligible: usize,
    /// Documents actually processed
    pub processed: usize,
    /// Processed documents that produced at least one match
    pub matched_documents: usize,
    pub rows: Vec<KeywordRow>,
}

/// The first `limit` texts with more than `min_words` whitespace-separated
/// words, in input order.
pub fn select_documents<'a>(
    texts: &[(usize, &'a str)],
    min_words: usize,
    limit: usize,
) -> Vec<(usize, &'a str)> {
    texts
        .iter()
        .filter(|(_, text)| word_count(text) > min_words)
        .take(limit)
        .copied()
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Run extraction over a sample of the corpus.
pub fn run_batch(
    engine: &dyn LanguageEngine,
    corpus: &Corpus,
    seeds: &SeedKeywords,
    stop_words: &StopWords,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let mut report = BatchReport {
        records: corpus.len(),
        ..BatchReport::default()
    };

    let mut texts: Vec<(usize, &str)> = Vec::with_capacity(corpus.len());
    for (index, text) in corpus.text_column(&options.text_field) {
        match (text, options.missing_field) {
            (Some(text), _) => texts.push((index, text)),
            (None, MissingFieldPolicy::Skip) => {
                warn!(row = index, field = %options.text_field, "Record has no text field, skipping");
                report.missing += 1;
            }
            (None, MissingFieldPolicy::Abort) => {
                anyhow::bail!(
                    "Record {index} has no string field {:?}",
                    options.text_field
                );
            }
        }
    }

    report.eligible = texts
        .iter()
        .filter(|(_, text)| word_count(text) > options.min_words)
        .count();
    let sample = select_documents(&texts, options.min_words, options.sample_size);
    info!(
        records = report.records,
        eligible = report.eligible,
        sample = sample.len(),
        "Selected documents"
    );

    let pb = if options.show_progress {
        let pb = ProgressBar::new(sample.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let lists = seeds.lists();
    for (index, text) in sample {
        let matches = keyword_generator(engine, text, &lists, stop_words, &options.matching);
        if !matches.is_empty() {
            report.matched_documents += 1;
        }
        report.rows.extend(
            matches
                .into_values()
                .map(|m| KeywordRow::from_match(index, m)),
        );
        report.processed += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        processed = report.processed,
        rows = report.rows.len(),
        "Batch extraction finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_word_cutoff_is_exclusive() {
        let forty = words(40);
        let forty_one = words(41);
        let texts = vec![(0, forty.as_str()), (1, forty_one.as_str())];
        let picked = select_documents(&texts, 40, 100);
        assert_eq!(picked, vec![(1, forty_one.as_str())]);
    }

    #[test]
    fn test_limit_keeps_first_in_order() {
        let long = words(50);
        let texts: Vec<(usize, &str)> = (0..150).map(|i| (i, long.as_str())).collect();
        let picked = select_documents(&texts, 40, 100);
        assert_eq!(picked.len(), 100);
        assert_eq!(picked.first().map(|p| p.0), Some(0));
        assert_eq!(picked.last().map(|p| p.0), Some(99));
    }

    #[test]
    fn test_fewer_than_limit_takes_all() {
        let long = words(45);
        let short = words(3);
        let texts = vec![(0, long.as_str()), (1, short.as_str()), (2, long.as_str())];
        let picked: Vec<usize> = select_documents(&texts, 40, 100).into_iter().map(|p| p.0).collect();
        assert_eq!(picked, vec![0, 2]);
    }

    #[test]
    fn test_word_count_uses_any_whitespace() {
        assert_eq!(word_count("a\tb\n c  d"), 4);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_row_puts_matched_keyword_under_source_column() {
        let row = KeywordRow::from_match(
            7,
            KeywordMatch {
                candidate: "speed".to_string(),
                frequency: 3,
                similarity: 0.93,
                keyword: "fast".to_string(),
                source: "performance".to_string(),
            },
        );
        assert_eq!(KEYWORD_COLUMNS[1], "Similarity Keyword");
        assert!((row.similarity - 0.93).abs() < 1e-6);
        assert_eq!(KEYWORD_COLUMNS[2], "Source Keyword");
        assert_eq!(row.keyword, "fast");
        assert_eq!(KEYWORD_COLUMNS[4], "Seed List");
        assert_eq!(row.seed_list, "performance");
        assert_eq!(row.document, 7);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Skip".parse::<MissingFieldPolicy>().unwrap(), MissingFieldPolicy::Skip);
        assert_eq!("abort".parse::<MissingFieldPolicy>().unwrap(), MissingFieldPolicy::Abort);
        assert!("ignore".parse::<MissingFieldPolicy>().is_err());
    }
}
