//! Example: List the files of a dataset draft or snapshot
//!
//! Usage:
//!   cargo run --example ls -- [--server URL] <DATASET> [VERSION]

mod cli;

use cli::{init_tracing, parse_connection, usage_and_exit};

const USAGE: &str =
    "Usage: cargo run --example ls -- [--server URL] [--api-key KEY] [--proxy PROXY] <DATASET> [VERSION]";

fn main() -> openneuro::Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.is_empty() || conn.positionals.len() > 2 {
        usage_and_exit(USAGE);
    }
    let dataset = &conn.positionals[0];
    let version = conn.positionals.get(1).map(String::as_str);

    let client = conn.connect()?;
    let files = client.files(dataset, version)?;

    for file in &files {
        match file.size {
            Some(size) => println!("{:>12}  {}", size, file.filename),
            None => println!("{:>12}  {}", "-", file.filename),
        }
    }
    println!("{} files", files.len());

    Ok(())
}
