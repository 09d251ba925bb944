//! Example: Dataset lifecycle commands
//!
//! Usage:
//!   cargo run --example dataset -- [--server URL] --api-key KEY create <LABEL>
//!   cargo run --example dataset -- [--server URL] --api-key KEY info <DATASET>
//!   cargo run --example dataset -- [--server URL] --api-key KEY describe <DATASET> <FIELD> <VALUE>
//!   cargo run --example dataset -- [--server URL] --api-key KEY rm <DATASET> <PATH>
//!   cargo run --example dataset -- [--server URL] --api-key KEY snapshot <DATASET> <TAG> [CHANGE...]
//!   cargo run --example dataset -- [--server URL] --api-key KEY publish <DATASET>
//!   cargo run --example dataset -- [--server URL] --api-key KEY delete <DATASET>

mod cli;

use cli::{init_tracing, parse_connection, usage_and_exit};

const USAGE: &str = "Usage: cargo run --example dataset -- [--server URL] [--api-key KEY] <create|info|describe|rm|snapshot|publish|delete> ARGS...";

fn main() -> openneuro::Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE);
    let args: Vec<&str> = conn.positionals.iter().map(String::as_str).collect();
    let client = conn.connect()?;

    match args.as_slice() {
        ["create", label] => {
            let id = client.create_dataset(label)?;
            println!("Created {}", id);
        }
        ["info", dataset] => {
            let info = client.dataset(dataset)?;
            println!("Dataset: {}", info.id);
            println!("Created: {}", info.created.as_deref().unwrap_or("(unknown)"));
            println!("Public: {}", info.public.unwrap_or(false));
            for snapshot in &info.snapshots {
                println!("  snapshot {}", snapshot.tag);
            }
        }
        ["describe", dataset, field, value] => {
            client.update_description(dataset, field, value)?;
            println!("Set {} on {}", field, dataset);
        }
        ["rm", dataset, path] => {
            client.delete_file(dataset, path)?;
            println!("Deleted {}:{}", dataset, path);
        }
        ["snapshot", dataset, tag, changes @ ..] => {
            let changes: Vec<String> = changes.iter().map(|c| c.to_string()).collect();
            let snapshot = client.create_snapshot(dataset, tag, &changes)?;
            println!("Snapshot {} created", snapshot.id);
        }
        ["publish", dataset] => {
            client.publish_dataset(dataset)?;
            println!("Published {}", dataset);
        }
        ["delete", dataset] => {
            client.delete_dataset(dataset)?;
            println!("Deleted {}", dataset);
        }
        _ => usage_and_exit(USAGE),
    }

    Ok(())
}
