//! Example: Upload one file into a dataset draft
//!
//! Usage:
//!   cargo run --example upload -- [--server URL] [--api-key KEY] <DATASET> <LOCAL_FILE|-> <REMOTE_PATH>
//!
//! A LOCAL_FILE of `-` uploads standard input.

mod cli;

use std::fs::File;
use std::process;

use cli::{init_tracing, parse_connection, usage_and_exit};
use openneuro::Sequential;

const USAGE: &str = "Usage: cargo run --example upload -- [--server URL] [--api-key KEY] [--proxy PROXY] <DATASET> <LOCAL_FILE|-> <REMOTE_PATH>";

fn main() -> openneuro::Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    if conn.positionals.len() != 3 {
        usage_and_exit(USAGE);
    }
    let dataset = &conn.positionals[0];
    let local_file = &conn.positionals[1];
    let remote_path = &conn.positionals[2];

    let client = conn.connect()?;

    println!("Uploading {} to {}:{}...", local_file, dataset, remote_path);
    let result = if local_file == "-" {
        let mut stdin = Sequential::new(std::io::stdin());
        client.upload_file(dataset, &mut stdin, remote_path)
    } else {
        let mut file = File::open(local_file)?;
        client.upload_file(dataset, &mut file, remote_path)
    };

    match result {
        Ok(id) => println!("Upload complete: {}", id),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    Ok(())
}
