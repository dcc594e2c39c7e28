use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::tokenizer::tokenize;

/// Default term frequency saturation
pub const DEFAULT_K1: f64 = 1.5;

/// Default document length normalization
pub const DEFAULT_B: f64 = 0.75;

/// BM25 tuning parameters, fixed for the lifetime of a corpus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

/// Tokenized corpus with the statistics BM25 scoring needs
///
/// Document `i` always corresponds to input document `i`.
#[derive(Debug, Clone, Default)]
pub struct Bm25Index {
    params: Bm25Params,
    documents: Vec<Vec<String>>,
    doc_lengths: Vec<usize>,
    avgdl: f64,
    doc_freqs: HashMap<String, usize>,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    /// Build an index with default parameters
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        Self::with_params(documents, Bm25Params::default())
    }

    /// Build an index with explicit parameters
    pub fn with_params<S: AsRef<str>>(documents: &[S], params: Bm25Params) -> Self {
        let documents: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let mut index = Self {
            params,
            documents,
            ..Default::default()
        };

        let n = index.documents.len();
        if n == 0 {
            debug!("Building BM25 index over an empty corpus");
            return index;
        }

        index.doc_lengths = index.documents.iter().map(Vec::len).collect();
        index.avgdl = index.doc_lengths.iter().sum::<usize>() as f64 / n as f64;

        for doc in &index.documents {
            let mut seen = HashSet::new();
            for term in doc {
                if seen.insert(term.as_str()) {
                    *index.doc_freqs.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        for (term, &df) in &index.doc_freqs {
            index.idf.insert(term.clone(), inverse_document_frequency(n, df));
        }

        debug!(
            "Built BM25 index: {} documents, {} terms, avgdl {:.3}",
            n,
            index.idf.len(),
            index.avgdl
        );

        index
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Number of documents (N)
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Tokens of document `idx`
    pub fn document(&self, idx: usize) -> Option<&[String]> {
        self.documents.get(idx).map(Vec::as_slice)
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    /// Token count of document `idx`
    pub fn doc_length(&self, idx: usize) -> Option<usize> {
        self.doc_lengths.get(idx).copied()
    }

    /// Mean document length, 0 for an empty corpus
    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    /// Number of documents containing `term` at least once
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Cached idf, `None` for terms the corpus has never seen
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }
}

/// Non-negative idf variant: `ln((N - df + 0.5) / (df + 0.5) + 1)`
pub fn inverse_document_frequency(n: usize, df: usize) -> f64 {
    let n = n as f64;
    let df = df as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}
