//! Benchmark CLI: run the LISA-style evaluation and report per-query and
//! aggregate retrieval metrics.

use anyhow::Result;
use clap::Parser;
use irbench::{report, BenchmarkRun, CancelToken, Config, MemoryIndex, RankingModel};
use std::path::PathBuf;

/// Evaluate retrieval quality against a benchmark corpus with known
/// relevance judgments.
#[derive(Parser, Debug)]
#[command(name = "irbench", version)]
struct Args {
    /// Path to config.toml (default: IRBENCH_CONFIG env var, then ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the ranking model from the config (boolean, vector-space, fuzzy).
    #[arg(long)]
    model: Option<RankingModel>,

    /// Skip writing the intersection dump and JSON report.
    #[arg(long)]
    no_artifacts: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = args.model {
        config.index.model = model;
    }

    log::info!(
        "starting irbench v{} (model: {})",
        env!("CARGO_PKG_VERSION"),
        config.index.model
    );

    let index = MemoryIndex::new(config.index.model);
    let output = config.output.clone();
    let mut run = BenchmarkRun::new(config, index);
    run.execute(&CancelToken::new())?;

    for (i, outcome) in run.outcomes().iter().enumerate() {
        println!(
            "Query {:>3}: precision {:.4}  recall {:.4}  ({} retrieved, {} expected, {} intersected)",
            i + 1,
            outcome.precision,
            outcome.recall,
            outcome.retrieved.len(),
            outcome.expected.len(),
            outcome.intersection.len()
        );
    }

    let metrics_report = run.report();

    println!("\n=== Benchmark Results ({} queries) ===", metrics_report.query_count);
    for (level, avg) in metrics_report
        .recall_levels
        .iter()
        .zip(metrics_report.average_precision)
    {
        println!("Avg precision at recall {level:.2}: {avg:.4}");
    }
    for (r, series) in &metrics_report.r_precision {
        let mean = if series.is_empty() {
            0.0
        } else {
            series.iter().sum::<f64>() / series.len() as f64
        };
        println!("Mean R-precision (R={r}): {mean:.4}");
    }

    if !metrics_report.warnings.is_empty() {
        println!("\nPartial results: {} warning(s)", metrics_report.warnings.len());
        for warning in &metrics_report.warnings {
            println!("  - {warning}");
        }
    }

    if !args.no_artifacts {
        if let Some(parent) = output.report.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(parent) = output.intersections.parent() {
            std::fs::create_dir_all(parent)?;
        }
        run.save_intersections(&output.intersections)?;
        report::save_report_json(&output.report, &metrics_report)?;
        log::info!(
            "artifacts written: {} and {}",
            output.intersections.display(),
            output.report.display()
        );
    }

    Ok(())
}
