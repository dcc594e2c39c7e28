use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::Domain;

/// A matching record reduced to the domain's output columns
///
/// Keeps output-column order, which is also the key order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    fields: Vec<(String, String)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of a single search call
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    /// Ranked rows from the domain's table
    Success {
        domain: Domain,
        query: String,
        /// Backing table file name
        source: String,
        count: usize,
        results: Vec<ResultRow>,
    },
    /// The backing table could not be located
    Error { error: String, domain: Domain },
}

impl SearchResult {
    pub fn domain(&self) -> Domain {
        match self {
            SearchResult::Success { domain, .. } | SearchResult::Error { domain, .. } => *domain,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchResult::Error { .. })
    }

    /// Result rows, empty for an error result
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            SearchResult::Success { results, .. } => results.as_slice(),
            SearchResult::Error { .. } => &[],
        }
    }
}
