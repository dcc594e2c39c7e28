pub mod config;
pub mod domain;
pub mod output;
pub mod search;
pub mod table;

pub use config::Config;
pub use domain::{Domain, detect_domain};
pub use search::{Catalog, SearchEngine, SearchResult};
