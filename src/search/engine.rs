use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::index::{Bm25Index, Bm25Params};
use super::result::{ResultRow, SearchResult};
use super::schema::{Catalog, DomainConfig};
use super::scorer::score;
use crate::config::Config;
use crate::domain::{Domain, detect_domain};
use crate::table::{Record, load_records};

/// Entry point for domain searches
///
/// Holds only immutable configuration; every call builds its own index.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    data_dir: PathBuf,
    max_results: usize,
    params: Bm25Params,
}

impl SearchEngine {
    /// Create an engine from config, resolving the data directory once
    pub fn new(config: &Config, catalog: Arc<Catalog>) -> Self {
        let data_dir = config.resolve_data_dir();
        info!("Using data directory {}", data_dir.display());

        Self {
            catalog,
            data_dir,
            max_results: config.max_results,
            params: Bm25Params::default(),
        }
    }

    /// Engine with the default catalog reading tables from `data_dir`
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        let config = Config {
            data_dir: Some(data_dir.into()),
            ..Config::default()
        };
        Self::new(&config, Arc::new(Catalog::default()))
    }

    /// Use different BM25 parameters for every search on this engine
    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Full path of a domain's backing table
    pub fn table_path(&self, domain: Domain) -> PathBuf {
        self.data_dir.join(self.catalog.get(domain).file)
    }

    /// Search one domain, auto-detecting it from the query when not given
    ///
    /// A missing table is reported as [`SearchResult::Error`]; failures while
    /// reading an existing table are returned as errors.
    pub fn search(
        &self,
        query: &str,
        domain: Option<Domain>,
        max_results: Option<usize>,
    ) -> Result<SearchResult> {
        let domain = domain.unwrap_or_else(|| detect_domain(query));
        let max_results = max_results.unwrap_or(self.max_results);
        let config = self.catalog.get(domain);
        let path = self.table_path(domain);

        debug!(
            "Searching domain '{}' for '{}' (max {} results)",
            domain, query, max_results
        );

        if !path.exists() {
            warn!("Table for domain '{}' not found at {}", domain, path.display());
            return Ok(SearchResult::Error {
                error: format!("File not found: {}", path.display()),
                domain,
            });
        }

        let records = load_records(&path)?;
        let results = rank_records(&records, config, query, max_results, self.params);

        info!(
            "Domain '{}': {} of {} records matched '{}'",
            domain,
            results.len(),
            records.len(),
            query
        );

        Ok(SearchResult::Success {
            domain,
            query: query.to_string(),
            source: config.file.to_string(),
            count: results.len(),
            results,
        })
    }

    /// Like [`search`](Self::search) but takes a domain name
    ///
    /// Unknown names use the device configuration, and the result then
    /// reports `device` as its domain rather than the name that was passed.
    pub fn search_named(
        &self,
        query: &str,
        domain: Option<&str>,
        max_results: Option<usize>,
    ) -> Result<SearchResult> {
        let domain = domain.map(|name| {
            name.parse::<Domain>().unwrap_or_else(|_| {
                warn!("Unknown domain '{}', using '{}'", name, Domain::Device);
                Domain::Device
            })
        });
        self.search(query, domain, max_results)
    }
}

/// Result limit for a signed count; negative counts select nothing
pub fn result_limit(requested: i64) -> usize {
    usize::try_from(requested).unwrap_or(0)
}

/// Searchable text of a record: its search columns joined by spaces
pub fn build_document(record: &Record, search_cols: &[&str]) -> String {
    search_cols
        .iter()
        .map(|col| record.get(*col).map(String::as_str).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Copy the output columns a record actually has, in configured order
pub fn project_record(record: &Record, output_cols: &[&str]) -> ResultRow {
    let mut row = ResultRow::new();
    for col in output_cols {
        if let Some(value) = record.get(*col) {
            row.push(*col, value.as_str());
        }
    }
    row
}

/// Rank records against a query and keep the top positive-score rows
///
/// Only the first `max_results` ranked entries are considered, so fewer rows
/// come back when some of them score zero.
pub fn rank_records(
    records: &[Record],
    config: &DomainConfig,
    query: &str,
    max_results: usize,
    params: Bm25Params,
) -> Vec<ResultRow> {
    let documents: Vec<String> = records
        .iter()
        .map(|record| build_document(record, config.search_cols))
        .collect();

    let index = Bm25Index::with_params(&documents, params);

    score(&index, query)
        .into_iter()
        .take(max_results)
        .filter(|hit| hit.score > 0.0)
        .map(|hit| project_record(&records[hit.index], config.output_cols))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_records;

    const PROTOCOLS: &str = "Protocol,Keywords,UseCase,DefaultPort,Settings,Example\n\
        Modbus TCP,ethernet tcp 502,Inverters and meters over LAN,502,Unit ID 1,read 40001\n\
        Modbus RTU,serial rs485 crc,Field devices on RS485,,9600 8N1,read 40001\n\
        BACnet/IP,building hvac,Building automation,47808,,whois\n\
        DNP3,utility scada,Substation telemetry,20000,,class 0 poll\n";

    fn protocol_config() -> DomainConfig {
        Catalog::default().get(Domain::Protocol).clone()
    }

    #[test]
    fn test_build_document_tolerates_missing_columns() {
        let mut record = Record::new();
        record.insert("Protocol".to_string(), "Modbus".to_string());
        record.insert("UseCase".to_string(), "PV plants".to_string());

        let doc = build_document(&record, &["Protocol", "Keywords", "UseCase"]);
        assert_eq!(doc, "Modbus  PV plants");
    }

    #[test]
    fn test_project_record_omits_absent_columns() {
        let mut record = Record::new();
        record.insert("Example".to_string(), "read 40001".to_string());
        record.insert("Protocol".to_string(), "Modbus".to_string());
        record.insert("Internal".to_string(), "hidden".to_string());

        let row = project_record(&record, &["Protocol", "Settings", "Example"]);
        assert_eq!(row.columns(), vec!["Protocol", "Example"]);
        assert_eq!(row.get("Internal"), None);
    }

    #[test]
    fn test_rank_records_only_positive_scores() {
        let records = parse_records(PROTOCOLS.as_bytes()).unwrap();
        let rows = rank_records(
            &records,
            &protocol_config(),
            "modbus",
            5,
            Bm25Params::default(),
        );

        // Same tf, the shorter RTU document wins
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Protocol"), Some("Modbus RTU"));
        assert_eq!(rows[1].get("Protocol"), Some("Modbus TCP"));
        assert_eq!(rows[0].get("DefaultPort"), Some(""));
    }

    #[test]
    fn test_rank_records_respects_limit() {
        let records = parse_records(PROTOCOLS.as_bytes()).unwrap();
        let config = protocol_config();

        let rows = rank_records(&records, &config, "modbus", 1, Bm25Params::default());
        assert_eq!(rows.len(), 1);

        let rows = rank_records(&records, &config, "modbus", 0, Bm25Params::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rank_records_limit_applies_before_filter() {
        let records = parse_records(PROTOCOLS.as_bytes()).unwrap();
        let rows = rank_records(
            &records,
            &protocol_config(),
            "nothing relevant",
            5,
            Bm25Params::default(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_result_limit() {
        assert_eq!(result_limit(5), 5);
        assert_eq!(result_limit(0), 0);
        assert_eq!(result_limit(-1), 0);
        assert_eq!(result_limit(i64::MIN), 0);
    }

    #[test]
    fn test_rank_records_params_change_scores() {
        let records = parse_records(PROTOCOLS.as_bytes()).unwrap();
        let config = protocol_config();

        // Without length normalization equal tf scores equally, so corpus order wins
        let flat = Bm25Params { k1: 1.5, b: 0.0 };
        let rows = rank_records(&records, &config, "modbus", 5, flat);
        assert_eq!(rows[0].get("Protocol"), Some("Modbus TCP"));

        let rows = rank_records(&records, &config, "modbus", 5, Bm25Params::default());
        assert_eq!(rows[0].get("Protocol"), Some("Modbus RTU"));
    }

    #[test]
    fn test_rank_records_empty_table() {
        let rows = rank_records(&[], &protocol_config(), "modbus", 5, Bm25Params::default());
        assert!(rows.is_empty());
    }
}
