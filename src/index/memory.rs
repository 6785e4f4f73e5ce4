//! In-memory search index.
//!
//! Deliberately simple: the benchmark evaluates retrieval quality, it does
//! not specify how scoring works. The index keeps per-document term
//! statistics and applies the selected ranking model at query time, so
//! switching models preserves ingested content with no reload round trip.

use crate::error::{IrBenchError, Result};
use crate::index::{Hit, RankingModel, SearchField, SearchIndex};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Minimum per-term similarity for the fuzzy model to count a match.
const FUZZY_THRESHOLD: f64 = 0.7;

#[derive(Debug)]
struct IndexedDocument {
    path: PathBuf,
    name: String,
    name_terms: Vec<String>,
    content_tf: HashMap<String, usize>,
}

/// An in-memory [`SearchIndex`] over name and content fields.
#[derive(Debug)]
pub struct MemoryIndex {
    model: RankingModel,
    docs: Vec<IndexedDocument>,
}

/// Lowercased alphanumeric terms.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity in [0, 1]: 1 minus the edit distance normalized by the longer
/// term.
fn term_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

impl IndexedDocument {
    fn term_frequency(&self, term: &str, fields: &[SearchField]) -> usize {
        let mut tf = 0;
        if fields.contains(&SearchField::Name) {
            tf += self.name_terms.iter().filter(|t| t.as_str() == term).count();
        }
        if fields.contains(&SearchField::Content) {
            tf += self.content_tf.get(term).copied().unwrap_or(0);
        }
        tf
    }

    fn terms<'a>(&'a self, fields: &[SearchField]) -> HashSet<&'a str> {
        let mut terms = HashSet::new();
        if fields.contains(&SearchField::Name) {
            terms.extend(self.name_terms.iter().map(String::as_str));
        }
        if fields.contains(&SearchField::Content) {
            terms.extend(self.content_tf.keys().map(String::as_str));
        }
        terms
    }
}

impl MemoryIndex {
    pub fn new(model: RankingModel) -> Self {
        Self {
            model,
            docs: Vec::new(),
        }
    }

    pub fn model(&self) -> RankingModel {
        self.model
    }

    /// Documents (of those in scope via `fields`) containing each query term,
    /// for idf weighting.
    fn document_frequencies(&self, terms: &[String], fields: &[SearchField]) -> Vec<usize> {
        terms
            .iter()
            .map(|t| {
                self.docs
                    .iter()
                    .filter(|d| d.term_frequency(t, fields) > 0)
                    .count()
            })
            .collect()
    }

    fn score_boolean(doc: &IndexedDocument, terms: &[String], fields: &[SearchField]) -> f64 {
        let all_present = terms.iter().all(|t| doc.term_frequency(t, fields) > 0);
        if all_present {
            1.0
        } else {
            0.0
        }
    }

    fn score_vector_space(
        &self,
        doc: &IndexedDocument,
        terms: &[String],
        dfs: &[usize],
        fields: &[SearchField],
    ) -> f64 {
        let n = self.docs.len() as f64;
        let mut dot = 0.0;
        let mut query_norm = 0.0;
        let mut doc_norm = 0.0;

        for (term, &df) in terms.iter().zip(dfs) {
            if df == 0 {
                continue;
            }
            let idf = (1.0 + n / df as f64).ln();
            let doc_weight = doc.term_frequency(term, fields) as f64 * idf;
            dot += idf * doc_weight;
            query_norm += idf * idf;
            doc_norm += doc_weight * doc_weight;
        }

        if dot == 0.0 {
            return 0.0;
        }
        dot / (query_norm.sqrt() * doc_norm.sqrt())
    }

    fn score_fuzzy(doc: &IndexedDocument, terms: &[String], fields: &[SearchField]) -> f64 {
        let doc_terms = doc.terms(fields);
        if doc_terms.is_empty() {
            return 0.0;
        }

        let mut total = 0.0;
        for term in terms {
            let best = doc_terms
                .iter()
                .map(|dt| term_similarity(term, dt))
                .fold(0.0f64, f64::max);
            if best >= FUZZY_THRESHOLD {
                total += best;
            }
        }
        total / terms.len() as f64
    }
}

impl SearchIndex for MemoryIndex {
    fn add_document(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| IrBenchError::Ingest {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mut content_tf: HashMap<String, usize> = HashMap::new();
        for term in tokenize(&content) {
            *content_tf.entry(term).or_insert(0) += 1;
        }

        self.docs.push(IndexedDocument {
            path: path.to_path_buf(),
            name_terms: tokenize(&name),
            name,
            content_tf,
        });
        Ok(())
    }

    fn submit_query(&self, query: &str, fields: &[SearchField], k: usize) -> Result<Vec<Hit>> {
        let terms = tokenize(query);
        if terms.is_empty() || self.docs.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let dfs = self.document_frequencies(&terms, fields);

        let mut hits: Vec<Hit> = self
            .docs
            .iter()
            .filter_map(|doc| {
                let score = match self.model {
                    RankingModel::Boolean => Self::score_boolean(doc, &terms, fields),
                    RankingModel::VectorSpace => {
                        self.score_vector_space(doc, &terms, &dfs, fields)
                    }
                    RankingModel::Fuzzy => Self::score_fuzzy(doc, &terms, fields),
                };
                (score > 0.0).then(|| Hit {
                    path: doc.path.clone(),
                    name: doc.name.clone(),
                    score: score as f32,
                })
            })
            .collect();

        // Stable sort: ties keep ingestion order
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    fn set_model(&mut self, model: RankingModel) {
        if self.model != model {
            log::info!(
                "switching ranking model {} -> {} ({} documents retained)",
                self.model,
                model,
                self.docs.len()
            );
            self.model = model;
        }
    }

    fn len(&self) -> usize {
        self.docs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BENCHMARK_FIELDS;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn build_index(model: RankingModel) -> (MemoryIndex, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut index = MemoryIndex::new(model);
        index
            .add_document(&write_doc(&dir, "1.txt", "the cat sat on the mat"))
            .unwrap();
        index
            .add_document(&write_doc(&dir, "2.txt", "a dog ran across the field"))
            .unwrap();
        index
            .add_document(&write_doc(&dir, "3.txt", "cats and dogs living together"))
            .unwrap();
        (index, dir)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("The cat, sat!"), vec!["the", "cat", "sat"]);
        assert!(tokenize("...").is_empty());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_add_document_unreadable_is_ingest_error() {
        let mut index = MemoryIndex::new(RankingModel::VectorSpace);
        let err = index.add_document(Path::new("no/such/doc.txt")).unwrap_err();
        assert!(matches!(err, IrBenchError::Ingest { .. }));
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_index_returns_no_hits() {
        let index = MemoryIndex::new(RankingModel::VectorSpace);
        let hits = index.submit_query("cat", &BENCHMARK_FIELDS, 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_boolean_requires_all_terms() {
        let (mut index, _dir) = build_index(RankingModel::Boolean);
        index.set_model(RankingModel::Boolean);

        let hits = index.submit_query("cat sat", &BENCHMARK_FIELDS, 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "1.txt");

        let hits = index.submit_query("cat dog", &BENCHMARK_FIELDS, 10).unwrap();
        assert!(hits.is_empty(), "no document holds both terms");
    }

    #[test]
    fn test_vector_space_ranks_matching_doc_first() {
        let (index, _dir) = build_index(RankingModel::VectorSpace);
        let hits = index.submit_query("cat mat", &BENCHMARK_FIELDS, 10).unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].name, "1.txt");
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score, "hits must be ranked descending");
        }
    }

    #[test]
    fn test_fuzzy_matches_near_terms() {
        let (index, _dir) = build_index(RankingModel::Fuzzy);
        // "cats" is one edit from "cat"
        let hits = index.submit_query("cats", &BENCHMARK_FIELDS, 10).unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert!(names.contains(&"3.txt"));
        assert!(names.contains(&"1.txt"));
    }

    #[test]
    fn test_name_field_is_searched() {
        let (index, _dir) = build_index(RankingModel::Boolean);
        let hits = index.submit_query("2", &[SearchField::Name], 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "2.txt");
    }

    #[test]
    fn test_k_limits_results() {
        let (index, _dir) = build_index(RankingModel::Fuzzy);
        let hits = index.submit_query("the", &BENCHMARK_FIELDS, 1).unwrap();
        assert!(hits.len() <= 1);
    }

    #[test]
    fn test_set_model_preserves_content() {
        let (mut index, _dir) = build_index(RankingModel::VectorSpace);
        let before = index.len();
        index.set_model(RankingModel::Fuzzy);
        assert_eq!(index.len(), before);
        assert_eq!(index.model(), RankingModel::Fuzzy);
    }
}
