// Tokenization, lemmatization and word vectors, the language engine the
// keyword pipeline runs on top of.

pub mod engine;
pub mod lemmatizer;
pub mod lexer;
pub mod stopwords;
pub mod traits;
pub mod vectors;
