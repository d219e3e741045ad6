// Keyword extraction: normalization, frequency counting and seed matching.

pub mod frequency;
pub mod generator;
pub mod matcher;
pub mod normalize;
pub mod seeds;
