// Language engine trait — swap-ready abstraction.
//
// The keyword pipeline only needs four things from an NLP backend: tokens with
// part-of-speech and punctuation flags, lemmas, per-word vectors, and cosine
// similarity between two words. Anything that can provide those (a static
// vector table, a transformer model, a remote service) can sit behind this trait.

use super::stopwords::StopWords;
use super::vectors::cosine_similarity;

/// Coarse part-of-speech class. Only the distinctions the normalizer filters
/// on are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    /// Any regular word
    Word,
    /// Digits or a spelled-out number ("42", "3.5", "seven")
    Num,
    /// Currency, math and other symbols, emoji
    Sym,
    /// Punctuation marks
    Punct,
}

/// A single token produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Lower-cased surface text
    pub text: String,
    /// Canonical base form of `text`
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_punct: bool,
    pub is_stop: bool,
}

/// Trait for the tokenization / embedding backend.
pub trait LanguageEngine {
    /// Tokenize and lemmatize `text`, flagging stopwords from `stop_words`.
    /// Whitespace never produces a token.
    fn analyze(&self, text: &str, stop_words: &StopWords) -> Vec<Token>;

    /// The vector for `word`, if the engine has a usable (non-zero) one.
    fn vector(&self, word: &str) -> Option<&[f32]>;

    fn has_vector(&self, word: &str) -> bool {
        self.vector(word).is_some()
    }

    /// Cosine similarity between two words, or `None` when either lacks a vector.
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        Some(cosine_similarity(va, vb))
    }
}
