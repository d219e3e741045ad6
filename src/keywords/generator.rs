// Keyword generator — the per-document chain of normalizer, counter and matcher.

use tracing::debug;

use super::frequency::text_to_frequencies;
use super::matcher::{similar_words, KeywordMatches, MatchOptions};
use super::normalize::normalize;
use super::seeds::SeedList;
use crate::nlp::stopwords::StopWords;
use crate::nlp::traits::LanguageEngine;

/// Extract keywords from one transcript.
///
/// `seeds` is the domain list optionally followed by client lists; matching
/// iterates them in that order.
pub fn keyword_generator(
    engine: &dyn LanguageEngine,
    transcript: &str,
    seeds: &[SeedList<'_>],
    stop_words: &StopWords,
    options: &MatchOptions,
) -> KeywordMatches {
    let lemmas = normalize(engine, transcript, stop_words);
    let freqs = text_to_frequencies(&lemmas);
    debug!(
        lemmas = lemmas.len(),
        candidates = freqs.len(),
        "Normalized transcript"
    );
    similar_words(engine, &freqs, seeds, options)
}
