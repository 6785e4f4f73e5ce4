//! Retrieval executor: runs parsed queries against the index and normalizes
//! hit names into comparison ids.

use crate::index::{SearchField, SearchIndex, BENCHMARK_FIELDS};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Caller-supplied cancellation signal. Once cancelled, queries not yet
/// executed get empty result slots; completed slots are untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One executed query slot: the ranked comparison ids plus a warning when
/// the slot was degraded (execution failure or cancellation).
#[derive(Debug, Clone)]
pub struct QueryExecution {
    pub retrieved: Vec<String>,
    pub warning: Option<String>,
}

fn run_one<I: SearchIndex>(
    index: &I,
    query_num: usize,
    query: &str,
    fields: &[SearchField],
    k: usize,
    cancel: &CancelToken,
) -> QueryExecution {
    if cancel.is_cancelled() {
        return QueryExecution {
            retrieved: Vec::new(),
            warning: Some(format!("query {} skipped: run cancelled", query_num + 1)),
        };
    }

    match index.submit_query(query, fields, k) {
        Ok(hits) => {
            // The index's ranking order is preserved verbatim
            let retrieved = hits.iter().map(|h| h.comparison_id().to_string()).collect();
            QueryExecution {
                retrieved,
                warning: None,
            }
        }
        Err(e) => {
            log::warn!("query {} failed: {}", query_num + 1, e);
            QueryExecution {
                retrieved: Vec::new(),
                warning: Some(format!("query {} failed: {}", query_num + 1, e)),
            }
        }
    }
}

/// Execute every query in order against the index, producing one result slot
/// per query. Failed or cancelled queries yield empty slots rather than
/// missing ones, so the output is always parallel with `queries`.
///
/// With `parallel` set, queries run on rayon's worker pool; slot order is
/// still determined by query position, never completion time.
pub fn execute_queries<I: SearchIndex + Sync>(
    index: &I,
    queries: &[String],
    k: usize,
    parallel: bool,
    cancel: &CancelToken,
) -> Vec<QueryExecution> {
    let run = |(num, query): (usize, &String)| {
        let execution = run_one(index, num, query, &BENCHMARK_FIELDS, k, cancel);
        log::debug!(
            "query {}: {} documents retrieved",
            num + 1,
            execution.retrieved.len()
        );
        execution
    };

    if parallel {
        queries.par_iter().enumerate().map(run).collect()
    } else {
        queries.iter().enumerate().map(run).collect()
    }
}
