// Module declarations
pub mod engine;
pub mod index;
pub mod result;
pub mod schema;
pub mod scorer;
pub mod tokenizer;

// Re-export public APIs
pub use engine::SearchEngine;
pub use index::{Bm25Index, Bm25Params};
pub use result::{ResultRow, SearchResult};
pub use schema::{Catalog, DomainConfig};
pub use scorer::{ScoredDoc, score};
pub use tokenizer::tokenize;
