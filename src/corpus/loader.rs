// Corpus loader for line-delimited JSON records.
//
// Each non-blank line must be one JSON object. Parsing is strict: the first
// line that is not valid JSON, or is valid JSON but not an object, fails the
// whole load with its 1-based line number. Compressed files are detected from
// the gzip magic bytes, so `reviews.json.gz` and `reviews.json` both work.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::bufread::MultiGzDecoder;
use serde_json::{Map, Value};
use tracing::info;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One row of the input corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row index, in input order (blank lines are not counted)
    pub index: usize,
    pub fields: Map<String, Value>,
}

impl Record {
    /// The value of a string field, or `None` if absent or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// All records of a corpus file, in input order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract one text field from every record as `(row index, value)`.
    pub fn text_column(&self, field: &str) -> Vec<(usize, Option<&str>)> {
        self.records.iter().map(|r| (r.index, r.text(field))).collect()
    }
}

/// Open a file for line reading, transparently decompressing gzip.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader
        .fill_buf()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Load a corpus file into memory.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let corpus = parse_corpus(open_text(path)?)
        .with_context(|| format!("Failed to load corpus {}", path.display()))?;
    info!(records = corpus.len(), path = %path.display(), "Loaded corpus");
    Ok(corpus)
}

/// Parse line-delimited JSON objects from any reader.
pub fn parse_corpus(reader: impl BufRead) -> Result<Corpus> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("corpus read error at line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("corpus parse error at line {line_no}"))?;
        let Value::Object(fields) = value else {
            anyhow::bail!("corpus parse error at line {line_no}: expected a JSON object");
        };

        records.push(Record {
            index: records.len(),
            fields,
        });
    }

    Ok(Corpus::from_records(records))
}

/// Read a whole plain-text transcript, optionally lower-cased.
pub fn read_transcript(path: &Path, lowercase: bool) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    if lowercase {
        Ok(text.to_lowercase())
    } else {
        Ok(text)
    }
}
