pub mod benchmark;
pub mod config;
pub mod corpus;
pub mod error;
pub mod executor;
pub mod index;
pub mod metrics;
pub mod report;

pub use benchmark::BenchmarkRun;
pub use config::Config;
pub use error::{IrBenchError, Result};
pub use executor::CancelToken;
pub use index::{MemoryIndex, RankingModel, SearchIndex};
pub use report::{MetricsReport, QueryOutcome};
