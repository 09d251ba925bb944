use std::env;
use std::process;

use openneuro::{Client, ClientConfig};
use tracing_subscriber::{EnvFilter, fmt};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("openneuro=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

pub struct Connection {
    pub config: ClientConfig,
    pub positionals: Vec<String>,
}

/// Parse `--server`, `--api-key` and `--proxy`, falling back to the
/// `OPENNEURO_URL` / `OPENNEURO_API_KEY` environment.
pub fn parse_connection(usage: &'static str) -> Connection {
    let mut parser = ArgParser::new(usage);
    let mut config = ClientConfig::from_env();
    if let Some(server) = parser.take_value(&["--server", "-s"]) {
        config = config.with_server(server);
    }
    if let Some(key) = parser.take_value(&["--api-key", "-k"]) {
        config = config.with_api_key(key);
    }
    if let Some(proxy) = parser.take_value(&["--proxy"]) {
        config = config.with_proxy(proxy);
    }

    Connection {
        config,
        positionals: parser.remaining(),
    }
}

impl Connection {
    pub fn connect(&self) -> openneuro::Result<Client> {
        Client::new(self.config.clone())
    }
}
