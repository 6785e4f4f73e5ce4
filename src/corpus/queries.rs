//! Query-file decoding (LISA `.que` style, sentinel `#`).

use crate::error::{IrBenchError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Decode queries from a text stream.
///
/// Lines accumulate into a buffer: a line longer than 2 characters is query
/// content (appended with a trailing space); a line ending in `#` closes the
/// current query. Lines of length <= 2 that do not close a query are
/// separators or bare query numbers and contribute nothing.
///
/// A closed query has its trailing `#` (and surrounding whitespace) stripped,
/// so `the cat sat #` decodes to `the cat sat`.
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    let mut buffer = String::new();

    for line in reader.lines() {
        let line = line?;

        if line.len() > 2 {
            buffer.push_str(&line);
            buffer.push(' ');
        }

        if line.trim_end().ends_with('#') {
            if buffer.trim_end().ends_with('#') {
                let end = buffer.trim_end().len() - 1;
                buffer.truncate(end);
            }
            queries.push(buffer.trim_end().to_string());
            buffer.clear();
        }
    }

    Ok(queries)
}

/// Read and decode a query file.
///
/// An unopenable file is a `Format` error; callers treat it as non-fatal for
/// the run as a whole (the benchmark continues with an empty query list).
pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        IrBenchError::Format(format!("cannot open query file {}: {}", path.display(), e))
    })?;
    parse_queries(BufReader::new(file))
}
