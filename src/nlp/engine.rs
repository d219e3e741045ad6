// Default language engine: rule-based tokenizer + lemmatizer over a static
// word-vector table.

use std::path::Path;

use anyhow::Result;

use super::lemmatizer::Lemmatizer;
use super::lexer::tokenize;
use super::stopwords::StopWords;
use super::traits::{LanguageEngine, PartOfSpeech, Token};
use super::vectors::WordVectors;

pub struct VectorEngine {
    vectors: WordVectors,
    lemmatizer: Lemmatizer,
}

impl VectorEngine {
    pub fn new(vectors: WordVectors, lemmatizer: Lemmatizer) -> Self {
        Self {
            vectors,
            lemmatizer,
        }
    }

    /// Load vectors (and optionally an extra lemma table) from disk.
    pub fn load(
        vectors_path: &Path,
        vector_limit: Option<usize>,
        lemma_table: Option<&Path>,
    ) -> Result<Self> {
        let vectors = WordVectors::load(vectors_path, vector_limit)?;
        let lemmatizer = match lemma_table {
            Some(path) => Lemmatizer::default().with_table_file(path)?,
            None => Lemmatizer::default(),
        };
        Ok(Self::new(vectors, lemmatizer))
    }

    pub fn vectors(&self) -> &WordVectors {
        &self.vectors
    }
}

impl LanguageEngine for VectorEngine {
    fn analyze(&self, text: &str, stop_words: &StopWords) -> Vec<Token> {
        tokenize(text)
            .into_iter()
            .map(|lexeme| {
                let text = lexeme.text.to_lowercase();
                let lemma = if lexeme.pos == PartOfSpeech::Word {
                    self.lemmatizer
                        .lemmatize(&text, |w| self.vectors.contains(w))
                } else {
                    text.clone()
                };
                Token {
                    is_stop: stop_words.is_stop(&text),
                    is_punct: lexeme.pos == PartOfSpeech::Punct,
                    pos: lexeme.pos,
                    lemma,
                    text,
                }
            })
            .collect()
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word)
    }
}
