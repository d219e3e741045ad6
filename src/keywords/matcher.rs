// Similarity matcher: candidate lemmas vs. seed keywords.
//
// Every candidate token is compared with every keyword token by cosine
// similarity of their word vectors. A candidate is kept when some keyword
// scores strictly above the threshold. Tokens without a usable vector are
// skipped.
//
// Thresholds that work in practice: 0.4 is too general, 0.5 suits mixed retail
// audio, 0.6 suits narrow technical audio.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use super::frequency::FrequencyMap;
use super::seeds::SeedList;
use crate::nlp::stopwords::StopWords;
use crate::nlp::traits::LanguageEngine;

pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// What to do when a candidate matches more than one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Keep the highest-similarity keyword; ties keep the earlier one
    #[default]
    Best,
    /// Keep the last qualifying keyword in iteration order
    Last,
}

impl FromStr for MatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best" => Ok(Self::Best),
            "last" => Ok(Self::Last),
            other => anyhow::bail!("unknown match policy {other:?} (expected \"best\" or \"last\")"),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best => write!(f, "best"),
            Self::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Similarity must be strictly greater than this
    pub threshold: f32,
    pub policy: MatchPolicy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: MatchPolicy::default(),
        }
    }
}

/// A candidate word that matched a seed keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub candidate: String,
    /// Occurrences of the candidate in its document
    pub frequency: u32,
    pub similarity: f32,
    /// The seed keyword it matched
    pub keyword: String,
    /// Name of the seed list the keyword came from
    pub source: String,
}

/// Matches keyed by candidate text, in the order candidates were first matched.
pub type KeywordMatches = IndexMap<String, KeywordMatch>;

/// Match the keys of `freqs` against the seed lists, in list order.
pub fn similar_words(
    engine: &dyn LanguageEngine,
    freqs: &FrequencyMap,
    seeds: &[SeedList<'_>],
    options: &MatchOptions,
) -> KeywordMatches {
    let mut matches = KeywordMatches::new();
    if freqs.is_empty() {
        return matches;
    }

    let no_stop_words = StopWords::none();

    // (keyword token text, list name), only for tokens that carry a vector
    let mut keyword_tokens: Vec<(String, &str)> = Vec::new();
    for list in seeds {
        for keyword in list.keywords {
            for token in engine.analyze(keyword, &no_stop_words) {
                if engine.has_vector(&token.text) {
                    keyword_tokens.push((token.text, list.name));
                }
            }
        }
    }

    let blob = freqs.keys().collect::<Vec<_>>().join(" ");
    for token in engine.analyze(&blob, &no_stop_words) {
        let Some(frequency) = freqs.get(&token.text) else {
            debug!(token = %token.text, "Candidate token is not a counted lemma, skipping");
            continue;
        };
        if !engine.has_vector(&token.text) {
            continue;
        }

        for (keyword, source) in &keyword_tokens {
            let Some(similarity) = engine.similarity(&token.text, keyword) else {
                continue;
            };
            if similarity <= options.threshold {
                continue;
            }

            let replace = match (options.policy, matches.get(&token.text)) {
                (_, None) | (MatchPolicy::Last, Some(_)) => true,
                (MatchPolicy::Best, Some(existing)) => similarity > existing.similarity,
            };
            if replace {
                matches.insert(
                    token.text.clone(),
                    KeywordMatch {
                        candidate: token.text.clone(),
                        frequency,
                        similarity,
                        keyword: keyword.clone(),
                        source: source.to_string(),
                    },
                );
            }
        }
    }

    debug!(
        candidates = freqs.len(),
        keywords = keyword_tokens.len(),
        matches = matches.len(),
        "Matched candidates against seed keywords"
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::engine::VectorEngine;
    use crate::nlp::lemmatizer::Lemmatizer;
    use crate::nlp::vectors::WordVectors;

    fn engine() -> VectorEngine {
        let vectors = WordVectors::from_pairs([
            ("quick", vec![0.9, 0.1, 0.0]),
            ("speed", vec![1.0, 0.0, 0.0]),
            ("fast", vec![0.8, 0.2, 0.0]),
            ("screen", vec![0.0, 1.0, 0.0]),
            ("display", vec![0.1, 0.9, 0.0]),
            ("banana", vec![0.0, 0.0, 1.0]),
        ])
        .unwrap();
        VectorEngine::new(vectors, Lemmatizer::default())
    }

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_best_policy_keeps_highest() {
        let freqs = FrequencyMap::count_lemmas(["quick", "quick"]);
        let kws = strings(&["fast", "speed"]);
        let out = similar_words(&engine(), &freqs, &[SeedList::new("d", &kws)], &MatchOptions::default());
        let m = &out["quick"];
        assert_eq!(m.keyword, "speed");
        assert_eq!(m.frequency, 2);
    }

    #[test]
    fn test_last_policy_keeps_last_qualifying() {
        let freqs = FrequencyMap::count_lemmas(["quick", "quick"]);
        let kws = strings(&["speed", "fast"]);
        let options = MatchOptions {
            policy: MatchPolicy::Last,
            ..MatchOptions::default()
        };
        let out = similar_words(&engine(), &freqs, &[SeedList::new("d", &kws)], &options);
        assert_eq!(out["quick"].keyword, "fast");
    }

    #[test]
    fn test_threshold_is_strict() {
        let freqs = FrequencyMap::count_lemmas(["screen", "screen"]);
        let kws = strings(&["screen"]);
        let options = MatchOptions {
            threshold: 1.0,
            ..MatchOptions::default()
        };
        let out = similar_words(&engine(), &freqs, &[SeedList::new("d", &kws)], &options);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unmatched_and_vectorless_skipped() {
        let freqs = FrequencyMap::count_lemmas(["banana", "banana", "gizmo", "gizmo"]);
        let kws = strings(&["speed", "unknownword"]);
        let out = similar_words(&engine(), &freqs, &[SeedList::new("d", &kws)], &MatchOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_source_list_recorded() {
        let freqs = FrequencyMap::count_lemmas(["screen", "screen", "quick", "quick"]);
        let domain = strings(&["speed"]);
        let client = strings(&["display"]);
        let out = similar_words(
            &engine(),
            &freqs,
            &[SeedList::new("performance", &domain), SeedList::new("general", &client)],
            &MatchOptions::default(),
        );
        assert_eq!(out["screen"].source, "general");
        assert_eq!(out["quick"].source, "performance");
        let order: Vec<&String> = out.keys().collect();
        assert_eq!(order, vec!["screen", "quick"]);
    }

    #[test]
    fn test_empty_frequencies() {
        let kws = strings(&["speed"]);
        let out = similar_words(
            &engine(),
            &FrequencyMap::default(),
            &[SeedList::new("d", &kws)],
            &MatchOptions::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("best".parse::<MatchPolicy>().unwrap(), MatchPolicy::Best);
        assert_eq!(" LAST ".parse::<MatchPolicy>().unwrap(), MatchPolicy::Last);
        assert!("first".parse::<MatchPolicy>().is_err());
    }
}
