use anyhow::Result;
use automation_search::output::{format_json, format_text};
use automation_search::search::engine::result_limit;
use automation_search::{Catalog, Config, Domain, SearchEngine};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{self, EnvFilter};

/// Search industrial device, protocol and troubleshooting tables
#[derive(Debug, Parser)]
#[command(name = "automation-search", version)]
struct Cli {
    /// Search query
    query: String,

    /// Search domain (auto-detected from the query when omitted)
    #[arg(short, long, value_parser = parse_domain)]
    domain: Option<Domain>,

    /// Max results (negative values return nothing)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    max_results: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Directory holding the CSV tables
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn parse_domain(value: &str) -> Result<Domain, String> {
    value.parse::<Domain>().map_err(|e| {
        let names: Vec<&str> = Domain::ALL.iter().map(Domain::as_str).collect();
        format!("{e} (expected one of: {})", names.join(", "))
    })
}

fn main() -> Result<()> {
    // stdout carries the report, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let engine = SearchEngine::new(&config, Arc::new(Catalog::default()));

    let max_results = cli.max_results.map(result_limit);

    let result = engine.search(&cli.query, cli.domain, max_results)?;

    if cli.json {
        println!("{}", format_json(&result)?);
    } else {
        println!("{}", format_text(&result));
    }

    Ok(())
}
