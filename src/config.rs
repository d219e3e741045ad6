use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::keywords::matcher::{MatchOptions, MatchPolicy, DEFAULT_THRESHOLD};
use crate::keywords::seeds::SeedKeywords;
use crate::pipeline::batch::{
    BatchOptions, MissingFieldPolicy, DEFAULT_MIN_WORDS, DEFAULT_SAMPLE_SIZE, DEFAULT_TEXT_FIELD,
};

pub const DEFAULT_OUTPUT: &str = "keyword.csv";

/// Central configuration loaded from environment variables.
///
/// A .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Word vector file (GloVe / word2vec text, optionally gzipped)
    pub vectors_path: PathBuf,
    /// Load at most this many vectors (the most frequent words come first)
    pub vector_limit: Option<usize>,
    /// Extra `inflected<TAB>lemma` table
    pub lemma_table: Option<PathBuf>,
    /// JSON seed file replacing the built-in keyword lists
    pub seeds_path: Option<PathBuf>,
    pub threshold: f32,
    pub match_policy: MatchPolicy,
    /// Corpus field holding the text to analyze
    pub text_field: String,
    pub min_words: usize,
    pub sample_size: usize,
    pub missing_field: MissingFieldPolicy,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vectors_path: default_vectors_path(),
            vector_limit: None,
            lemma_table: None,
            seeds_path: None,
            threshold: DEFAULT_THRESHOLD,
            match_policy: MatchPolicy::default(),
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            min_words: DEFAULT_MIN_WORDS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            missing_field: MissingFieldPolicy::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. A variable that is set but can't be parsed
    /// is an error rather than a silent fallback.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            vectors_path: lookup("SEEDWORD_VECTORS")
                .map(PathBuf::from)
                .unwrap_or(defaults.vectors_path),
            vector_limit: parse_var(&lookup, "SEEDWORD_VECTOR_LIMIT")?,
            lemma_table: lookup("SEEDWORD_LEMMAS").map(PathBuf::from),
            seeds_path: lookup("SEEDWORD_SEEDS").map(PathBuf::from),
            threshold: parse_var(&lookup, "SEEDWORD_THRESHOLD")?.unwrap_or(defaults.threshold),
            match_policy: parse_var(&lookup, "SEEDWORD_MATCH_POLICY")?
                .unwrap_or(defaults.match_policy),
            text_field: lookup("SEEDWORD_TEXT_FIELD").unwrap_or(defaults.text_field),
            min_words: parse_var(&lookup, "SEEDWORD_MIN_WORDS")?.unwrap_or(defaults.min_words),
            sample_size: parse_var(&lookup, "SEEDWORD_SAMPLE_SIZE")?
                .unwrap_or(defaults.sample_size),
            missing_field: parse_var(&lookup, "SEEDWORD_MISSING_FIELD")?
                .unwrap_or(defaults.missing_field),
            output_path: lookup("SEEDWORD_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Call again after applying CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "Similarity threshold must be between -1.0 and 1.0, got {}",
                self.threshold
            );
        }
        if self.text_field.is_empty() {
            anyhow::bail!("Text field name must not be empty");
        }
        Ok(())
    }

    /// Check that the word vector file exists.
    /// Call this before any operation that needs the language engine.
    pub fn require_vectors(&self) -> Result<()> {
        if !self.vectors_path.exists() {
            anyhow::bail!(
                "Word vector file not found: {}\n\
                 Set SEEDWORD_VECTORS to a GloVe or word2vec text file (e.g. glove.6B.300d.txt),\n\
                 or place one at the default location.",
                self.vectors_path.display()
            );
        }
        Ok(())
    }

    /// The configured seed lists, or the built-in defaults.
    pub fn seeds(&self) -> Result<SeedKeywords> {
        match &self.seeds_path {
            Some(path) => SeedKeywords::load(path),
            None => Ok(SeedKeywords::default()),
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.threshold,
            policy: self.match_policy,
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            text_field: self.text_field.clone(),
            min_words: self.min_words,
            sample_size: self.sample_size,
            missing_field: self.missing_field,
            matching: self.match_options(),
            show_progress: true,
        }
    }

    pub fn lemma_table(&self) -> Option<&Path> {
        self.lemma_table.as_deref()
    }
}

/// Returns the default word vector location.
/// Uses the platform data directory: ~/.local/share/seedword/vectors.txt on Linux.
pub fn default_vectors_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("seedword")
        .join("vectors.txt")
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!((config.threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.text_field, "reviewText");
        assert_eq!(config.min_words, 40);
        assert_eq!(config.sample_size, 100);
        assert_eq!(config.output_path, PathBuf::from("keyword.csv"));
        assert_eq!(config.match_policy, MatchPolicy::Best);
        assert_eq!(config.missing_field, MissingFieldPolicy::Skip);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SEEDWORD_THRESHOLD", "0.6"),
            ("SEEDWORD_MATCH_POLICY", "last"),
            ("SEEDWORD_MISSING_FIELD", "abort"),
            ("SEEDWORD_VECTOR_LIMIT", "50000"),
            ("SEEDWORD_TEXT_FIELD", "transcript"),
        ]))
        .unwrap();
        assert!((config.threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.match_policy, MatchPolicy::Last);
        assert_eq!(config.missing_field, MissingFieldPolicy::Abort);
        assert_eq!(config.vector_limit, Some(50000));
        assert_eq!(config.batch_options().text_field, "transcript");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::from_lookup(lookup(&[("SEEDWORD_THRESHOLD", "high")])).unwrap_err();
        assert!(format!("{err:#}").contains("SEEDWORD_THRESHOLD"));
        assert!(Config::from_lookup(lookup(&[("SEEDWORD_THRESHOLD", "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SEEDWORD_MATCH_POLICY", "first")])).is_err());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[("SEEDWORD_MIN_WORDS", "  ")])).unwrap();
        assert_eq!(config.min_words, 40);
    }

    #[test]
    fn test_require_vectors_missing() {
        let config = Config {
            vectors_path: PathBuf::from("/nonexistent/vectors.txt"),
            ..Config::default()
        };
        assert!(config.require_vectors().is_err());
    }
}
