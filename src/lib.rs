// seedword: seed-keyword extraction from transcripts and reviews
//
// This is the library root. Each module corresponds to a stage of the
// extraction pipeline.

pub mod config;
pub mod corpus;
pub mod keywords;
pub mod nlp;
pub mod output;
pub mod pipeline;
