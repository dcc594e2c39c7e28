use anyhow::{Context, Result};

use crate::search::SearchResult;

/// Longest field value shown in text output before truncation
pub const MAX_FIELD_CHARS: usize = 300;

/// Cut a value to [`MAX_FIELD_CHARS`] characters, marking the cut with "..."
pub fn truncate_field(value: &str) -> String {
    match value.char_indices().nth(MAX_FIELD_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &value[..byte_idx]),
        None => value.to_string(),
    }
}

/// Render a search result as a Markdown report
pub fn format_text(result: &SearchResult) -> String {
    let (domain, query, source, count, results) = match result {
        SearchResult::Error { error, .. } => return format!("Error: {error}"),
        SearchResult::Success {
            domain,
            query,
            source,
            count,
            results,
        } => (domain, query, source, count, results),
    };

    let mut output = vec![
        "## Automation Search Results".to_string(),
        format!("**Domain:** {domain} | **Query:** {query}"),
        format!("**Source:** {source} | **Found:** {count} results\n"),
    ];

    for (i, row) in results.iter().enumerate() {
        output.push(format!("### Result {}", i + 1));
        for (key, value) in row.iter() {
            output.push(format!("- **{key}:** {}", truncate_field(value)));
        }
        output.push(String::new());
    }

    output.join("\n")
}

/// Render a search result as pretty-printed JSON
pub fn format_json(result: &SearchResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize search result")
}
