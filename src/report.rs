//! Per-query outcome records, the aggregate metrics report, and the export
//! artifacts (intersection dump, measure series, JSON report).

use crate::error::{IrBenchError, Result};
use crate::index::RankingModel;
use crate::metrics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Everything computed for one query, held in a single record so the
/// per-query arrays can never fall out of alignment.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub expected: Vec<String>,
    pub retrieved: Vec<String>,
    pub intersection: Vec<String>,
    pub precision: f64,
    pub recall: f64,
    /// Warnings attached to this query's position (parse failure, execution
    /// failure, cancellation)
    pub warnings: Vec<String>,
}

impl QueryOutcome {
    /// Build the outcome for one query from its expected and retrieved id
    /// lists, computing intersection, precision, and recall.
    pub fn evaluate(
        query: String,
        expected: Vec<String>,
        retrieved: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        let intersection = metrics::intersection(&expected, &retrieved);
        let precision = metrics::precision(&intersection, &retrieved);
        let recall = metrics::recall(&intersection, &expected);
        Self {
            query,
            expected,
            retrieved,
            intersection,
            precision,
            recall,
            warnings,
        }
    }
}

/// Aggregate retrieval-quality report over all queries, exportable as JSON
/// numeric series for an external plotting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub generated_at: DateTime<Utc>,
    pub model: RankingModel,
    pub query_count: usize,
    pub recall_levels: [f64; 3],
    /// Per-query precision, indexed by query position
    pub precision: Vec<f64>,
    /// Per-query recall, indexed by query position
    pub recall: Vec<f64>,
    /// Per-query interpolated precision at the standard recall levels
    pub interpolated_precision: Vec<[f64; 3]>,
    /// Mean interpolated precision per recall level across all queries
    pub average_precision: [f64; 3],
    /// Per-query R-precision series, keyed by cutoff R
    pub r_precision: BTreeMap<usize, Vec<f64>>,
    /// Per-query F-measure (harmonic mean of precision and recall)
    pub f_measure: Vec<f64>,
    /// Per-query E-measure at the configured b
    pub e_measure: Vec<f64>,
    pub e_measure_b: f64,
    /// Flattened warnings, prefixed with the 1-based query number where one
    /// applies
    pub warnings: Vec<String>,
}

impl MetricsReport {
    /// Compute the aggregate report from per-query outcomes.
    pub fn from_outcomes(
        outcomes: &[QueryOutcome],
        model: RankingModel,
        r_cutoffs: &[usize],
        e_measure_b: f64,
        run_warnings: &[String],
    ) -> Self {
        let interpolated_precision: Vec<[f64; 3]> = outcomes
            .iter()
            .map(|o| metrics::interpolated_precision(&o.expected, &o.retrieved))
            .collect();

        let mut r_precision = BTreeMap::new();
        for &r in r_cutoffs {
            let series: Vec<f64> = outcomes
                .iter()
                .map(|o| metrics::r_precision(&o.expected, &o.retrieved, r))
                .collect();
            r_precision.insert(r, series);
        }

        let f_measure: Vec<f64> = outcomes
            .iter()
            .map(|o| metrics::f_measure(o.precision, o.recall))
            .collect();
        let e_measure: Vec<f64> = outcomes
            .iter()
            .map(|o| metrics::e_measure(o.precision, o.recall, e_measure_b))
            .collect();

        let mut warnings: Vec<String> = run_warnings.to_vec();
        for (i, outcome) in outcomes.iter().enumerate() {
            for w in &outcome.warnings {
                warnings.push(format!("query {}: {}", i + 1, w));
            }
        }

        Self {
            generated_at: Utc::now(),
            model,
            query_count: outcomes.len(),
            recall_levels: metrics::RECALL_LEVELS,
            precision: outcomes.iter().map(|o| o.precision).collect(),
            recall: outcomes.iter().map(|o| o.recall).collect(),
            average_precision: metrics::average_precision_by_level(&interpolated_precision),
            interpolated_precision,
            r_precision,
            f_measure,
            e_measure,
            e_measure_b,
            warnings,
        }
    }
}

const INTERSECTION_HEADER: &str = "Docs intersected for query ";

/// Write the per-query intersection dump: one block per query in query
/// order, one document id per line under a header naming the 1-based query
/// number.
pub fn write_intersections<W: Write>(mut writer: W, outcomes: &[QueryOutcome]) -> Result<()> {
    for (i, outcome) in outcomes.iter().enumerate() {
        writeln!(writer, "{}{}:", INTERSECTION_HEADER, i + 1)?;
        for id in &outcome.intersection {
            writeln!(writer, "{id}")?;
        }
    }
    Ok(())
}

/// Persist the intersection dump to a file. A write failure is fatal for
/// this export only; the in-memory outcomes stay valid.
pub fn save_intersections(path: &Path, outcomes: &[QueryOutcome]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_intersections(&mut writer, outcomes)?;
    writer.flush()?;
    Ok(())
}

/// Read an intersection dump back: one id list per query block, in query
/// order.
pub fn read_intersections<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with(INTERSECTION_HEADER) {
            blocks.push(Vec::new());
        } else if !line.trim().is_empty() {
            match blocks.last_mut() {
                Some(block) => block.push(line),
                None => {
                    return Err(IrBenchError::Format(
                        "intersection dump does not start with a query header".to_string(),
                    ))
                }
            }
        }
    }
    Ok(blocks)
}

/// Load an intersection dump from a file.
pub fn load_intersections(path: &Path) -> Result<Vec<Vec<String>>> {
    read_intersections(BufReader::new(File::open(path)?))
}

/// Write a measure series (F-measure, E-measure, precision, ...) as plain
/// text, one value per line in query order.
pub fn save_measure(path: &Path, series: &[f64]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in series {
        writeln!(writer, "{value}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the full report as pretty-printed JSON.
pub fn save_report_json(path: &Path, report: &MetricsReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| IrBenchError::Format(format!("cannot serialize report: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}
