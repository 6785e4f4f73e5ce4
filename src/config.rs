use crate::index::RankingModel;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Benchmark corpus files
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Document-list file: one filesystem path per line
    pub documents: PathBuf,
    /// Query file (LISA `.que` style, sentinel `#`)
    pub queries: PathBuf,
    /// Relevance-judgment file (LISA `.rel` style, sentinel `-1`)
    pub judgments: PathBuf,
}

/// Index collaborator settings
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub model: RankingModel,
    /// Maximum hits requested per query
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,
    /// Execute queries on a bounded worker pool instead of sequentially
    #[serde(default)]
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            model: RankingModel::default(),
            max_hits: default_max_hits(),
            parallel: false,
        }
    }
}

fn default_max_hits() -> usize {
    50
}

/// Metric cutoffs and parameters
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// R values for the R-precision series
    #[serde(default = "default_r_precision_cutoffs")]
    pub r_precision_cutoffs: Vec<usize>,
    /// Parameter b for the E-measure
    #[serde(default = "default_e_measure_b")]
    pub e_measure_b: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            r_precision_cutoffs: default_r_precision_cutoffs(),
            e_measure_b: default_e_measure_b(),
        }
    }
}

fn default_r_precision_cutoffs() -> Vec<usize> {
    vec![5, 10, 15]
}

fn default_e_measure_b() -> f64 {
    0.5
}

/// Output artifact paths
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_intersections_path")]
    pub intersections: PathBuf,
    #[serde(default = "default_report_path")]
    pub report: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            intersections: default_intersections_path(),
            report: default_report_path(),
        }
    }
}

fn default_intersections_path() -> PathBuf {
    PathBuf::from("results/intersections.txt")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results/report.json")
}

impl Config {
    /// Load configuration from file.
    ///
    /// Looks for the config file in this order:
    /// 1. Path specified in the IRBENCH_CONFIG environment variable
    /// 2. ./config.toml in the current directory
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("IRBENCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("corpus.documents", &self.corpus.documents),
            ("corpus.queries", &self.corpus.queries),
            ("corpus.judgments", &self.corpus.judgments),
        ] {
            if !path.is_file() {
                anyhow::bail!("{} does not exist: {}", label, path.display());
            }
        }

        if self.index.max_hits == 0 {
            anyhow::bail!("index.max_hits must be greater than 0");
        }

        if self.evaluation.r_precision_cutoffs.is_empty() {
            anyhow::bail!("evaluation.r_precision_cutoffs must not be empty");
        }
        if self.evaluation.r_precision_cutoffs.contains(&0) {
            anyhow::bail!("evaluation.r_precision_cutoffs must not contain 0");
        }

        if self.evaluation.e_measure_b <= 0.0 {
            anyhow::bail!("evaluation.e_measure_b must be greater than 0.0");
        }

        Ok(())
    }
}
