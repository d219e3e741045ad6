// Text normalizer: lower-case, tokenize, drop noise, lemmatize.

use crate::nlp::stopwords::StopWords;
use crate::nlp::traits::{LanguageEngine, PartOfSpeech, Token};

/// Reduce free text to the lemmas worth counting, in text order with
/// duplicates kept.
///
/// Stopwords, punctuation, numbers and symbols are removed. A token is also
/// dropped when its lemma is itself a stopword ("wants" -> "want").
pub fn normalize(engine: &dyn LanguageEngine, text: &str, stop_words: &StopWords) -> Vec<String> {
    let lower = text.to_lowercase();
    engine
        .analyze(&lower, stop_words)
        .into_iter()
        .filter(|token| keep_token(token) && !stop_words.is_stop(&token.lemma))
        .map(|token| token.lemma)
        .collect()
}

/// Whether a token survives normalization on its own flags.
pub fn keep_token(token: &Token) -> bool {
    !token.is_stop
        && !token.is_punct
        && !matches!(token.pos, PartOfSpeech::Num | PartOfSpeech::Sym)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::engine::VectorEngine;
    use crate::nlp::lemmatizer::Lemmatizer;
    use crate::nlp::vectors::WordVectors;

    fn engine() -> VectorEngine {
        let vectors = WordVectors::from_pairs([
            ("battery", vec![1.0, 0.0]),
            ("want", vec![0.0, 1.0]),
        ])
        .unwrap();
        VectorEngine::new(vectors, Lemmatizer::default())
    }

    #[test]
    fn test_removes_noise_and_keeps_order() {
        let sw = StopWords::from_words(["the", "is", "and"]);
        let out = normalize(
            &engine(),
            "The BATTERY is 100% great, and the batteries last 3 days!",
            &sw,
        );
        assert_eq!(out, vec!["battery", "great", "battery", "last", "days"]);
    }

    #[test]
    fn test_lemma_that_is_a_stopword_is_dropped() {
        let sw = StopWords::from_words(["want"]);
        assert!(normalize(&engine(), "wants", &sw).is_empty());
    }

    #[test]
    fn test_extra_stopwords_removed() {
        let out = normalize(&engine(), "okay hello cool laptop", &StopWords::english());
        assert_eq!(out, vec!["laptop"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(normalize(&engine(), "", &StopWords::english()).is_empty());
        assert!(normalize(&engine(), "  \n\t ", &StopWords::english()).is_empty());
    }
}
