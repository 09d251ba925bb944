//! Async connection state shared by all operations.
//!
//! Operations are implemented on [`Session`] in `fs::operations`; the public
//! [`Client`](crate::Client) drives them to completion on its own runtime.

use crate::api::GraphQlClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;

/// Configured transport for one OpenNeuro server.
#[derive(Debug)]
pub(crate) struct Session {
    config: ClientConfig,
    http: HttpClient,
    graphql: GraphQlClient,
}

impl Session {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::from_config(&config)?;
        let graphql =
            GraphQlClient::new(http.clone(), config.graphql_url(), config.request_timeout);
        Ok(Self {
            config,
            http,
            graphql,
        })
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    pub(crate) fn graphql(&self) -> &GraphQlClient {
        &self.graphql
    }
}
