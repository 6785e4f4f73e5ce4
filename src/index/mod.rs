//! Search index collaborator: the narrow interface the benchmark consumes,
//! plus a small in-memory implementation.

pub mod memory;
pub mod model;

pub use memory::MemoryIndex;
pub use model::RankingModel;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Fields a query is restricted to. The benchmark always searches both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Content,
}

/// The field set the benchmark submits every query against.
pub const BENCHMARK_FIELDS: [SearchField; 2] = [SearchField::Name, SearchField::Content];

/// One retrieval result as delivered by the index.
#[derive(Debug, Clone)]
pub struct Hit {
    /// Filesystem path the document was ingested from
    pub path: PathBuf,
    /// Document name (final path component, extension included)
    pub name: String,
    /// Relevance score assigned by the ranking model
    pub score: f32,
}

impl Hit {
    /// Identifier used when comparing against relevance judgments: the
    /// document name with its file extension stripped (everything from the
    /// last `.` onward). A name without a `.` is its own identifier.
    pub fn comparison_id(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

/// Narrow interface the benchmark consumes the search engine through.
///
/// The handle is passed explicitly into the orchestrator at construction
/// time; there is no process-wide shared index.
pub trait SearchIndex {
    /// Ingest one document identified by a filesystem path. Unreadable
    /// content is an `Ingest` error; callers recover and continue with the
    /// remaining documents.
    fn add_document(&mut self, path: &Path) -> Result<()>;

    /// Execute a query restricted to the named fields, returning at most `k`
    /// hits ranked by descending score. An empty index yields an empty
    /// sequence, not an error.
    fn submit_query(&self, query: &str, fields: &[SearchField], k: usize) -> Result<Vec<Hit>>;

    /// Switch the ranking model. Ingested document content must survive the
    /// switch.
    fn set_model(&mut self, model: RankingModel);

    /// Number of ingested documents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
