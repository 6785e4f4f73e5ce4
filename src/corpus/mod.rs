//! Benchmark format parser: query file, relevance-judgment file, and the
//! document-list file naming the corpus to ingest.

pub mod judgments;
pub mod queries;

pub use judgments::{parse_judgments, read_judgments, JudgmentWarning, ParsedJudgments};
pub use queries::{parse_queries, read_queries};

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read the document-list file: one filesystem path per line, blank lines
/// skipped.
pub fn read_document_list(path: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(path)?;
    let mut paths = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}
