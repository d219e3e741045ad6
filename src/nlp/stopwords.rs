// Stopword configuration.
//
// A StopWords value is immutable once built and is passed into every
// normalization call. Nothing here touches shared engine state, so two calls
// with different stopword sets never see each other's words.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Words that carry no keyword signal in spoken transcripts, on top of the
/// standard English list.
pub const EXTRA_STOPWORDS: &[&str] = &[
    "hello", "yes", "left", "right", "like", "think", "want", "need", "cool", "okay", "",
];

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The default English list plus [`EXTRA_STOPWORDS`].
    pub fn english() -> Self {
        let base: Vec<String> = get(LANGUAGE::English);
        Self::from_words(base).with_extra(EXTRA_STOPWORDS.iter().copied())
    }

    /// Build a set from an explicit word list. Words are lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// An empty set. Used when tokenizing keyword blobs, where nothing is filtered.
    pub fn none() -> Self {
        Self::default()
    }

    /// Return a copy of this set with `extra` added. Adding a word that is
    /// already present is a no-op.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(extra.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
