use std::collections::HashMap;
use tracing::debug;

use super::index::Bm25Index;
use super::tokenizer::tokenize;

/// A document position in the corpus paired with its BM25 score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub index: usize,
    pub score: f64,
}

/// Score every document of `index` against `query`
///
/// The result always holds one entry per document, highest score first.
/// Equal scores keep corpus order so top-N selection is deterministic.
pub fn score(index: &Bm25Index, query: &str) -> Vec<ScoredDoc> {
    let query_tokens = tokenize(query);
    let params = index.params();
    let avgdl = index.avgdl();

    let mut scored: Vec<ScoredDoc> = index
        .documents()
        .iter()
        .enumerate()
        .map(|(idx, doc)| {
            let doc_len = doc.len() as f64;

            let mut term_freqs: HashMap<&str, usize> = HashMap::new();
            for term in doc {
                *term_freqs.entry(term.as_str()).or_insert(0) += 1;
            }

            let mut score = 0.0;
            for token in &query_tokens {
                // Unseen terms carry no weight
                let Some(idf) = index.idf(token) else {
                    continue;
                };
                let tf = term_freqs.get(token.as_str()).copied().unwrap_or(0) as f64;
                let numerator = tf * (params.k1 + 1.0);
                let denominator =
                    tf + params.k1 * (1.0 - params.b + params.b * doc_len / avgdl);
                score += idf * numerator / denominator;
            }

            ScoredDoc { index: idx, score }
        })
        .collect();

    // Stable sort, ties stay in corpus order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        "Scored {} documents for {} query tokens",
        scored.len(),
        query_tokens.len()
    );

    scored
}
