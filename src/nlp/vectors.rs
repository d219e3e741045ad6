// Static word vectors loaded from a GloVe / word2vec text file.
//
// One word per line followed by its components, separated by spaces. A
// word2vec-style header line (`<count> <dim>`) is detected and skipped. The
// file may be gzip-compressed. All rows share one dimension; the first row
// fixes it.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::corpus::loader::open_text;

/// An in-memory word → vector table. Vectors are stored contiguously.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    dim: usize,
    index: HashMap<String, usize>,
    data: Vec<f32>,
    norms: Vec<f32>,
}

impl WordVectors {
    /// Load a vector file, keeping at most `limit` words (the first ones in the
    /// file, which for GloVe and word2vec are the most frequent).
    pub fn load(path: &Path, limit: Option<usize>) -> Result<Self> {
        let reader = open_text(path)?;
        let vectors = Self::from_reader(reader, limit)
            .with_context(|| format!("Failed to load word vectors from {}", path.display()))?;

        info!(
            words = vectors.len(),
            dim = vectors.dim(),
            path = %path.display(),
            "Loaded word vectors"
        );
        Ok(vectors)
    }

    pub fn from_reader(reader: impl BufRead, limit: Option<usize>) -> Result<Self> {
        let mut vectors = Self::default();
        let mut duplicates = 0usize;

        for (i, line) in reader.lines().enumerate() {
            if limit.is_some_and(|max| vectors.len() >= max) {
                break;
            }
            let line = line.with_context(|| format!("read error at line {}", i + 1))?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if i == 0 && is_header(&fields) {
                continue;
            }
            if fields.len() < 2 {
                anyhow::bail!("line {}: expected a word followed by its vector", i + 1);
            }

            let components = if vectors.dim == 0 {
                fields.len() - 1
            } else {
                vectors.dim
            };
            if fields.len() <= components {
                anyhow::bail!(
                    "line {}: expected {} components, found {}",
                    i + 1,
                    components,
                    fields.len() - 1
                );
            }

            // Some GloVe releases contain words with embedded spaces.
            let split = fields.len() - components;
            let word = fields[..split].join(" ");
            let values = fields[split..]
                .iter()
                .map(|f| f.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .with_context(|| format!("line {}: invalid vector component", i + 1))?;

            if !vectors.push(word, &values)? {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            debug!(duplicates, "Skipped duplicate words in vector file");
        }
        Ok(vectors)
    }

    /// Build a table from explicit `(word, vector)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut vectors = Self::default();
        for (word, values) in pairs {
            vectors.push(word.into(), &values)?;
        }
        Ok(vectors)
    }

    /// Append a row. Returns false if the word was already present (first wins).
    fn push(&mut self, word: String, values: &[f32]) -> Result<bool> {
        if values.is_empty() {
            anyhow::bail!("vector for {word:?} is empty");
        }
        if self.dim == 0 {
            self.dim = values.len();
        } else if values.len() != self.dim {
            anyhow::bail!(
                "vector for {word:?} has {} components, expected {}",
                values.len(),
                self.dim
            );
        }
        if self.index.contains_key(&word) {
            return Ok(false);
        }

        let norm = values
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt() as f32;
        self.index.insert(word, self.norms.len());
        self.data.extend_from_slice(values);
        self.norms.push(norm);
        Ok(true)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `word` has a row at all (zero vectors included).
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// The vector for `word`, if present and non-zero.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        let row = *self.index.get(word)?;
        if self.norms[row] <= f32::EPSILON {
            return None;
        }
        let start = row * self.dim;
        Some(&self.data[start..start + self.dim])
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() == 2 && fields.iter().all(|f| f.parse::<usize>().is_ok())
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Returns 0.0 for empty, zero-magnitude or mismatched-length inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    let mag_a: f64 = a.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_glove_format() {
        let text = "laptop 1.0 0.0 0.0\nbattery 0.0 1.0 0.0\n";
        let v = WordVectors::from_reader(Cursor::new(text), None).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.dim(), 3);
        assert_eq!(v.get("battery"), Some(&[0.0, 1.0, 0.0][..]));
    }

    #[test]
    fn test_word2vec_header_skipped() {
        let text = "2 2\nfast 0.5 0.5\nspeed 0.4 0.6\n";
        let v = WordVectors::from_reader(Cursor::new(text), None).unwrap();
        assert_eq!(v.len(), 2);
        assert!(v.contains("speed"));
    }

    #[test]
    fn test_dimension_mismatch_reports_line() {
        let text = "fast 0.5 0.5 0.1\nspeed 0.4\n";
        let err = WordVectors::from_reader(Cursor::new(text), None).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");
    }

    #[test]
    fn test_limit_keeps_first_rows() {
        let text = "a 1 0\nb 0 1\nc 1 1\n";
        let v = WordVectors::from_reader(Cursor::new(text), Some(2)).unwrap();
        assert_eq!(v.len(), 2);
        assert!(!v.contains("c"));
    }

    #[test]
    fn test_zero_vector_is_not_usable() {
        let v = WordVectors::from_pairs([("null", vec![0.0, 0.0])]).unwrap();
        assert!(v.contains("null"));
        assert!(v.get("null").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let v = WordVectors::from_pairs([("a", vec![1.0, 0.0]), ("a", vec![0.0, 1.0])]).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v.get("a"), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn test_cosine_identical() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_not_clamped_to_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_and_degenerate() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = [1.0, 3.0, -2.0, 0.5];
        let b = [2.0, -1.0, 4.0, 0.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-6);
    }
}
