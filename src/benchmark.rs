//! Benchmark orchestrator: parse the corpus, ingest documents, execute
//! queries, compute per-query outcomes, and export artifacts.

use crate::config::Config;
use crate::corpus;
use crate::error::Result;
use crate::executor::{execute_queries, CancelToken};
use crate::index::SearchIndex;
use crate::report::{self, MetricsReport, QueryOutcome};
use std::path::Path;

/// One evaluation pass over the benchmark corpus.
///
/// The index is passed in as an explicit handle; the run owns it for the
/// duration of the pass. All per-query data lives in [`QueryOutcome`]
/// records, so the query, expected, retrieved, and metric values for a
/// position can never fall out of alignment.
pub struct BenchmarkRun<I: SearchIndex> {
    config: Config,
    index: I,
    outcomes: Vec<QueryOutcome>,
    /// Warnings not scoped to a single query (ingest discrepancy, empty
    /// index, unreadable corpus files)
    run_warnings: Vec<String>,
}

impl<I: SearchIndex + Sync> BenchmarkRun<I> {
    pub fn new(config: Config, index: I) -> Self {
        Self {
            config,
            index,
            outcomes: Vec::new(),
            run_warnings: Vec::new(),
        }
    }

    /// Execute the full evaluation pass: queries and judgments are parsed,
    /// the document list is ingested, every query runs against the index,
    /// and per-query outcomes are computed.
    ///
    /// Parse and ingest failures are recovered locally: the affected slot is
    /// recorded empty and a warning is attached, so downstream metrics stay
    /// aligned by query position.
    pub fn execute(&mut self, cancel: &CancelToken) -> Result<()> {
        let queries = self.load_queries();
        let (mut expected_lists, mut judgment_warnings) = self.load_judgments();

        // Alignment: one judgment list per query, whatever the file held
        if expected_lists.len() != queries.len() {
            self.run_warnings.push(format!(
                "{} queries but {} judgment lists; padding or truncating to match",
                queries.len(),
                expected_lists.len()
            ));
            expected_lists.resize(queries.len(), Vec::new());
        }
        judgment_warnings.retain(|w| w.query < queries.len());

        self.ingest_documents()?;

        if self.index.is_empty() {
            self.run_warnings
                .push("index holds zero documents; ranking is meaningless".to_string());
            log::warn!("executing benchmark against an empty index");
        }

        log::info!("executing {} queries", queries.len());
        let executions = execute_queries(
            &self.index,
            &queries,
            self.config.index.max_hits,
            self.config.index.parallel,
            cancel,
        );

        self.outcomes = queries
            .into_iter()
            .zip(expected_lists)
            .zip(executions)
            .enumerate()
            .map(|(i, ((query, expected), execution))| {
                let mut warnings: Vec<String> = judgment_warnings
                    .iter()
                    .filter(|w| w.query == i)
                    .map(|w| w.message.clone())
                    .collect();
                warnings.extend(execution.warning);
                QueryOutcome::evaluate(query, expected, execution.retrieved, warnings)
            })
            .collect();

        for (i, outcome) in self.outcomes.iter().enumerate() {
            log::debug!(
                "query {}: |expected| = {}, |retrieved| = {}, |intersection| = {}",
                i + 1,
                outcome.expected.len(),
                outcome.retrieved.len(),
                outcome.intersection.len()
            );
        }

        Ok(())
    }

    fn load_queries(&mut self) -> Vec<String> {
        match corpus::read_queries(&self.config.corpus.queries) {
            Ok(queries) => {
                log::info!("parsed {} queries", queries.len());
                queries
            }
            Err(e) => {
                log::error!("{e}");
                self.run_warnings.push(e.to_string());
                Vec::new()
            }
        }
    }

    fn load_judgments(&mut self) -> (Vec<Vec<String>>, Vec<corpus::JudgmentWarning>) {
        match corpus::read_judgments(&self.config.corpus.judgments) {
            Ok(parsed) => {
                log::info!("parsed {} judgment lists", parsed.lists.len());
                (parsed.lists, parsed.warnings)
            }
            Err(e) => {
                log::error!("{e}");
                self.run_warnings.push(e.to_string());
                (Vec::new(), Vec::new())
            }
        }
    }

    /// Ingest every document named by the document-list file. A document
    /// that cannot be read is skipped with a warning; the listed-vs-ingested
    /// discrepancy is surfaced on the run.
    fn ingest_documents(&mut self) -> Result<()> {
        let paths = match corpus::read_document_list(&self.config.corpus.documents) {
            Ok(paths) => paths,
            Err(e) => {
                log::error!(
                    "cannot read document list {}: {e}",
                    self.config.corpus.documents.display()
                );
                self.run_warnings
                    .push(format!("document list unreadable: {e}"));
                return Ok(());
            }
        };

        log::info!(
            "loading index with {} ({} documents)",
            self.config.corpus.documents.display(),
            paths.len()
        );

        let mut ingested = 0usize;
        for path in &paths {
            match self.index.add_document(path) {
                Ok(()) => ingested += 1,
                Err(e) => log::warn!("{e}"),
            }
        }

        if ingested != paths.len() {
            self.run_warnings.push(format!(
                "only {} of {} listed documents ingested",
                ingested,
                paths.len()
            ));
        }

        Ok(())
    }

    /// Per-query outcomes, indexed by query position.
    pub fn outcomes(&self) -> &[QueryOutcome] {
        &self.outcomes
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Build the aggregate metrics report from the computed outcomes.
    pub fn report(&self) -> MetricsReport {
        MetricsReport::from_outcomes(
            &self.outcomes,
            self.config.index.model,
            &self.config.evaluation.r_precision_cutoffs,
            self.config.evaluation.e_measure_b,
            &self.run_warnings,
        )
    }

    /// Persist the per-query intersection dump. Failure here is fatal for
    /// the export step only; outcomes remain valid in memory.
    pub fn save_intersections(&self, path: &Path) -> Result<()> {
        report::save_intersections(path, &self.outcomes)
    }
}
