use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::debug;

/// One table row, keyed by header column name
///
/// Columns the row has no cell for are simply absent.
pub type Record = HashMap<String, String>;

/// Load every row of a comma-delimited table with a header row
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open table {}", path.display()))?;

    let records =
        read_records(reader).with_context(|| format!("Failed to read table {}", path.display()))?;

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse CSV text from any reader, mostly useful for in-memory tables
pub fn parse_records<R: io::Read>(input: R) -> Result<Vec<Record>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_records(reader)
}

fn read_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    let headers = reader
        .headers()
        .context("Failed to read header row")?
        .clone();

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed row {}", line + 1))?;

        // Short rows lack trailing columns; extra cells have no header and are dropped
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}
