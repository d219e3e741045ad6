// Seed keyword sets, the targets candidate words are matched against.
//
// Two named lists: "performance" is used as the domain list and "general" as
// the client list. The built-in lists target consumer electronics reviews; a
// JSON file with the same shape replaces them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const GENERAL_KEYWORDS: &[&str] = &[
    "technology", "computer", "laptop", "tablet", "device", "charging", "smart", "headphones",
    "micro", "discount", "mobile", "electric",
];

pub const PERFORMANCE_KEYWORDS: &[&str] = &[
    "speed", "fast", "display", "size", "brightness", "battery", "quality", "sleek",
    "lightweight", "wireless", "camera",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedKeywords {
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub performance: Vec<String>,
}

impl Default for SeedKeywords {
    fn default() -> Self {
        Self {
            general: GENERAL_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            performance: PERFORMANCE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SeedKeywords {
    /// Load seed lists from a JSON file: `{"general": [...], "performance": [...]}`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seeds: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid seed file {}", path.display()))?;
        if seeds.general.is_empty() && seeds.performance.is_empty() {
            anyhow::bail!("Seed file {} contains no keywords", path.display());
        }
        Ok(seeds)
    }

    /// The primary list (performance keywords).
    pub fn domain(&self) -> SeedList<'_> {
        SeedList::new("performance", &self.performance)
    }

    /// The secondary list (general keywords).
    pub fn client(&self) -> SeedList<'_> {
        SeedList::new("general", &self.general)
    }

    /// Domain list followed by client list, the order the matcher iterates in.
    pub fn lists(&self) -> [SeedList<'_>; 2] {
        [self.domain(), self.client()]
    }
}

/// A named, borrowed list of seed keywords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedList<'a> {
    pub name: &'a str,
    pub keywords: &'a [String],
}

impl<'a> SeedList<'a> {
    pub fn new(name: &'a str, keywords: &'a [String]) -> Self {
        Self { name, keywords }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_lists() {
        let seeds = SeedKeywords::default();
        assert_eq!(seeds.general.len(), 12);
        assert_eq!(seeds.performance.len(), 11);
        assert_eq!(seeds.domain().name, "performance");
        assert_eq!(seeds.client().name, "general");
        assert!(seeds.domain().keywords.contains(&"battery".to_string()));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"performance": ["latency", "throughput"]}}"#).unwrap();
        let seeds = SeedKeywords::load(file.path()).unwrap();
        assert_eq!(seeds.performance, vec!["latency", "throughput"]);
        assert!(seeds.general.is_empty());
    }

    #[test]
    fn test_load_rejects_empty_and_unknown() {
        let mut empty = tempfile::NamedTempFile::new().unwrap();
        write!(empty, "{{}}").unwrap();
        assert!(SeedKeywords::load(empty.path()).is_err());

        let mut unknown = tempfile::NamedTempFile::new().unwrap();
        write!(unknown, r#"{{"client": ["x"]}}"#).unwrap();
        assert!(SeedKeywords::load(unknown.path()).is_err());
    }
}
