// English lemmatizer: irregular forms plus vocabulary-checked suffix rules.
//
// Suffix stripping alone produces stems ("batteri"), which have no vector. So
// every candidate produced by a rule is only accepted if the vocabulary knows
// it; otherwise the word is returned unchanged. Irregular forms and any extra
// table loaded from disk are applied unconditionally.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::corpus::loader::open_text;

const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"),
    ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"), ("went", "go"),
    ("gone", "go"), ("goes", "go"), ("got", "get"), ("gotten", "get"), ("made", "make"),
    ("bought", "buy"), ("brought", "bring"), ("thought", "think"), ("said", "say"),
    ("took", "take"), ("taken", "take"), ("came", "come"), ("saw", "see"), ("seen", "see"),
    ("knew", "know"), ("known", "know"), ("gave", "give"), ("given", "give"),
    ("found", "find"), ("told", "tell"), ("felt", "feel"), ("kept", "keep"),
    ("left", "leave"), ("ran", "run"), ("paid", "pay"), ("sent", "send"), ("built", "build"),
    ("spent", "spend"), ("held", "hold"), ("broke", "break"), ("broken", "break"),
    ("wrote", "write"), ("written", "write"), ("chose", "choose"), ("chosen", "choose"),
    ("children", "child"), ("men", "man"), ("women", "woman"), ("people", "person"),
    ("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"),
    ("indices", "index"), ("criteria", "criterion"), ("media", "medium"),
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
];

/// Words that look inflected but are not.
const UNINFLECTED: &[&str] = &[
    "news", "series", "species", "physics", "electronics", "lens", "bus", "gas", "always",
    "perhaps", "this", "thus", "its", "his", "hers", "ours", "yours", "theirs", "less",
    "unless", "headphones", "earphones", "glasses", "pants", "scissors", "wireless",
    "thing", "nothing", "something", "anything", "everything", "morning", "evening",
    "during", "ceiling", "string", "spring", "king", "ring", "wing", "bring", "sing",
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lemmas: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self {
            lemmas: IRREGULAR
                .iter()
                .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect(),
        }
    }
}

impl Lemmatizer {
    /// Extend the irregular table from a tab-separated `inflected<TAB>lemma` file.
    /// Blank lines and lines starting with `#` are ignored.
    pub fn with_table_file(mut self, path: &Path) -> Result<Self> {
        let reader = open_text(path)?;
        let mut added = 0usize;
        for (i, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((form, lemma)) = line.split_once('\t') else {
                anyhow::bail!(
                    "{}:{}: expected `inflected<TAB>lemma`, got {line:?}",
                    path.display(),
                    i + 1
                );
            };
            self.lemmas
                .insert(form.trim().to_lowercase(), lemma.trim().to_lowercase());
            added += 1;
        }
        debug!(entries = added, path = %path.display(), "Loaded lemma table");
        Ok(self)
    }

    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.lemmas.insert(form.to_lowercase(), lemma.to_lowercase());
    }

    /// Reduce a lower-cased word to its lemma. `is_known` answers whether a
    /// candidate base form exists in the vocabulary.
    pub fn lemmatize(&self, word: &str, is_known: impl Fn(&str) -> bool) -> String {
        if let Some(lemma) = self.lemmas.get(word) {
            return lemma.clone();
        }
        if UNINFLECTED.iter().any(|w| *w == word) || word.chars().count() <= 3 {
            return word.to_string();
        }
        candidates(word)
            .into_iter()
            .find(|c| plausible_stem(c) && is_known(c.as_str()))
            .unwrap_or_else(|| word.to_string())
    }
}

/// Candidate base forms for `word`, most specific rule first.
fn candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(stem) = word.strip_suffix("ies") {
        out.push(format!("{stem}y"));
        out.push(format!("{stem}ie"));
    } else if let Some(stem) = word.strip_suffix("es") {
        if ["ss", "sh", "ch", "x", "z", "o"].iter().any(|s| stem.ends_with(s)) {
            out.push(stem.to_string());
        }
        out.push(format!("{stem}e"));
    } else if let Some(stem) = word.strip_suffix('s') {
        if !["s", "u", "i"].iter().any(|s| stem.ends_with(s)) {
            out.push(stem.to_string());
        }
    }

    if let Some(stem) = word.strip_suffix("ied") {
        out.push(format!("{stem}y"));
        out.push(format!("{stem}ie"));
    } else if let Some(stem) = word.strip_suffix("ed") {
        if !word.ends_with("eed") {
            push_verb_stems(&mut out, stem);
        }
    }

    if let Some(stem) = word.strip_suffix("ing") {
        push_verb_stems(&mut out, stem);
    }

    out
}

/// "runn" -> run, runne, runn; "rat" -> rate, rat.
///
/// The bare stem goes last: short words like "rat" or "not" are in any large
/// vocabulary and would otherwise shadow "rate" and "note".
fn push_verb_stems(out: &mut Vec<String>, stem: &str) {
    let mut chars = stem.chars().rev();
    if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
        if a == b && !"aeiouyls".contains(a) {
            out.push(stem[..stem.len() - a.len_utf8()].to_string());
        }
    }
    out.push(format!("{stem}e"));
    out.push(stem.to_string());
}

fn plausible_stem(stem: &str) -> bool {
    stem.chars().count() >= 3 && stem.chars().any(|c| "aeiouy".contains(c))
}
