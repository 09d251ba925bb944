//! Example: Download a dataset draft or snapshot
//!
//! Usage:
//!   cargo run --example download -- [--server URL] <DATASET> <LOCAL_DIR> [VERSION]

mod cli;

use std::process;

use cli::{init_tracing, parse_connection, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example download -- [--server URL] [--api-key KEY] [--proxy PROXY] <DATASET> <LOCAL_DIR> [VERSION]";

fn main() -> openneuro::Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() < 2 || conn.positionals.len() > 3 {
        usage_and_exit(USAGE);
    }
    let dataset = &conn.positionals[0];
    let local_dir = &conn.positionals[1];
    let version = conn.positionals.get(2).map(String::as_str);

    let client = conn.connect()?;

    println!("Downloading {} to {}...", dataset, local_dir);
    let report = client.download_dataset(dataset, version, local_dir)?;

    println!("Downloaded {} files", report.downloaded.len());
    for (file, error) in &report.failed {
        eprintln!("Failed: {}: {}", file, error);
    }
    if !report.is_complete() {
        process::exit(1);
    }

    Ok(())
}
