// Per-document lemma frequencies.
//
// Only lemmas longer than three characters that occur more than once survive
// filtering. Insertion order (first occurrence in the text) is preserved so
// the downstream matcher and the CSV output are deterministic.

use indexmap::IndexMap;

/// A lemma must be strictly longer than this many characters to be kept.
pub const MIN_LEMMA_CHARS: usize = 3;

/// A lemma must occur strictly more often than this to be kept.
pub const MIN_COUNT: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyMap {
    counts: IndexMap<String, u32>,
}

impl FrequencyMap {
    /// Count every lemma, without filtering.
    pub fn count_lemmas<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        for lemma in lemmas {
            *counts.entry(lemma.as_ref().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Keep only entries that pass [`qualifies`].
    pub fn filtered(&self) -> Self {
        Self {
            counts: self
                .counts
                .iter()
                .filter(|(lemma, count)| qualifies(lemma, **count))
                .map(|(lemma, &count)| (lemma.clone(), count))
                .collect(),
        }
    }

    pub fn get(&self, lemma: &str) -> Option<u32> {
        self.counts.get(lemma).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Whether a lemma with this count belongs in a filtered map.
pub fn qualifies(lemma: &str, count: u32) -> bool {
    lemma.chars().count() > MIN_LEMMA_CHARS && count > MIN_COUNT
}

/// Count lemmas and filter in one step.
pub fn text_to_frequencies<S: AsRef<str>>(lemmas: &[S]) -> FrequencyMap {
    FrequencyMap::count_lemmas(lemmas).filtered()
}
