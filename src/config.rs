//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::{OpenNeuroError, Result};

/// Default OpenNeuro instance.
pub const DEFAULT_SERVER: &str = "https://openneuro.org";

/// Environment variable overriding the server URL.
pub const SERVER_ENV: &str = "OPENNEURO_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENNEURO_API_KEY";

/// Settings used to build a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the OpenNeuro instance, without trailing slash
    pub server: String,
    /// API key, sent as the `accessToken` cookie
    pub api_key: Option<String>,
    /// Optional HTTP/SOCKS proxy URL
    pub proxy: Option<String>,
    /// Timeout for JSON requests (uploads and downloads are not bounded)
    pub request_timeout: Duration,
    /// How many times a single file download is attempted
    pub download_attempts: u32,
    /// Initial delay between download attempts, doubled each time
    pub retry_delay: Duration,
    /// Size of each read from an upload stream
    pub upload_chunk_size: usize,
    /// Number of chunks buffered between the stream reader and the request body
    pub upload_buffer_chunks: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            api_key: None,
            proxy: None,
            request_timeout: Duration::from_secs(20),
            download_attempts: 3,
            retry_delay: Duration::from_millis(250),
            upload_chunk_size: 64 * 1024,
            upload_buffer_chunks: 4,
        }
    }
}

impl ClientConfig {
    /// Configuration for the given server with everything else defaulted.
    pub fn new(server: impl Into<String>) -> Self {
        Self::default().with_server(server)
    }

    /// Defaults overlaid with `OPENNEURO_URL` and `OPENNEURO_API_KEY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(server) = non_empty_var(SERVER_ENV) {
            config = config.with_server(server);
        }
        if let Some(key) = non_empty_var(API_KEY_ENV) {
            config.api_key = Some(key);
        }
        config
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = normalize_server(&server.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_download_attempts(mut self, attempts: u32) -> Self {
        self.download_attempts = attempts;
        self
    }

    /// Check the settings and parse the server URL.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.server).map_err(|e| {
            OpenNeuroError::Config(format!("Invalid server URL {}: {}", self.server, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OpenNeuroError::Config(format!(
                "Unsupported server scheme: {}",
                url.scheme()
            )));
        }
        if self.download_attempts == 0 {
            return Err(OpenNeuroError::Config(
                "download_attempts must be at least 1".to_string(),
            ));
        }
        if self.upload_chunk_size == 0 || self.upload_buffer_chunks == 0 {
            return Err(OpenNeuroError::Config(
                "upload buffering must be non-zero".to_string(),
            ));
        }
        Ok(url)
    }

    pub(crate) fn graphql_url(&self) -> String {
        format!("{}/crn/graphql", self.server)
    }

    /// REST listing URL of a draft or snapshot. The id and tag are escaped
    /// as single path segments.
    pub(crate) fn download_url(&self, dataset: &str, version: Option<&str>) -> Result<String> {
        let mut url = self.validate()?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                OpenNeuroError::Config(format!("Server URL {} cannot be a base", self.server))
            })?;
            segments.pop_if_empty().extend(["crn", "datasets", dataset]);
            if let Some(version) = version {
                segments.extend(["snapshots", version]);
            }
            segments.push("download");
        }
        Ok(url.into())
    }
}

fn normalize_server(server: &str) -> String {
    server.trim().trim_end_matches('/').to_string()
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
