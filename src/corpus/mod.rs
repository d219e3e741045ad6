// Corpus input: line-delimited review records and plain-text transcripts.

pub mod loader;
