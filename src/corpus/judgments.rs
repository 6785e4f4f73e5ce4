//! Relevance-judgment decoding (LISA `.rel` style, sentinel `-1`).

use crate::error::{IrBenchError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One warning raised while decoding judgments, attached to the 0-based
/// position of the judgment list it concerns.
#[derive(Debug, Clone)]
pub struct JudgmentWarning {
    pub query: usize,
    pub message: String,
}

/// Decoded relevance judgments: one ordered list of document ids per query,
/// aligned by position with the query list, plus any per-position warnings.
#[derive(Debug, Default)]
pub struct ParsedJudgments {
    pub lists: Vec<Vec<String>>,
    pub warnings: Vec<JudgmentWarning>,
}

/// Decode relevance judgments from a text stream.
///
/// Blocks are optionally preceded by header lines containing `Query` or
/// `Refs` (skipped) and terminated by a `-1` token. Tokens are
/// whitespace-separated integer document ids and may span physical lines.
///
/// A non-integer token is non-fatal: the offending judgment list is recorded
/// empty, a warning carrying its position is surfaced, and decoding resumes
/// at that block's sentinel.
pub fn parse_judgments<R: BufRead>(reader: R) -> Result<ParsedJudgments> {
    let mut parsed = ParsedJudgments::default();
    let mut current: Vec<String> = Vec::new();
    let mut in_block = false;
    let mut poisoned = false;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if !in_block && (trimmed.is_empty() || trimmed.contains("Query") || trimmed.contains("Refs"))
        {
            continue;
        }
        if trimmed.is_empty() {
            // blank continuation inside a block: keep reading until the sentinel
            continue;
        }
        in_block = true;

        let mut terminated = false;
        for token in trimmed.split_whitespace() {
            match token.parse::<i64>() {
                Ok(-1) => {
                    terminated = true;
                    break;
                }
                Ok(_) => {
                    if !poisoned {
                        current.push(token.to_string());
                    }
                }
                Err(_) => {
                    if !poisoned {
                        parsed.warnings.push(JudgmentWarning {
                            query: parsed.lists.len(),
                            message: format!(
                                "non-integer token {token:?} in relevance judgments"
                            ),
                        });
                        current.clear();
                        poisoned = true;
                    }
                }
            }
        }

        if terminated {
            parsed.lists.push(std::mem::take(&mut current));
            in_block = false;
            poisoned = false;
        }
    }

    if in_block {
        parsed.warnings.push(JudgmentWarning {
            query: parsed.lists.len(),
            message: "judgment block missing -1 sentinel at end of file".to_string(),
        });
        parsed.lists.push(std::mem::take(&mut current));
    }

    Ok(parsed)
}

/// Read and decode a relevance-judgment file.
pub fn read_judgments(path: &Path) -> Result<ParsedJudgments> {
    let file = File::open(path).map_err(|e| {
        IrBenchError::Format(format!(
            "cannot open relevance file {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_judgments(BufReader::new(file))
}
