//! HTTP client wrapper for OpenNeuro requests.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{OpenNeuroError, Result};

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("openneuro-rs/", env!("CARGO_PKG_VERSION"));

/// Raw reply to a request whose status code is not trusted on its own.
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// HTTP client for making requests to an OpenNeuro server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client carrying the configured API key and proxy.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        if let Some(key) = &config.api_key {
            let mut cookie = HeaderValue::from_str(&format!("accessToken={}", key))
                .map_err(|e| OpenNeuroError::Config(format!("Invalid API key: {}", e)))?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| OpenNeuroError::Config(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| OpenNeuroError::Config(format!("Failed to build client: {}", e)))?;
        Ok(Self { client })
    }

    /// GET a JSON document, failing on non-success status.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(OpenNeuroError::HttpError(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// POST a JSON body and return status and text without judging the status.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply> {
        let response = self.client.post(url).json(body).send().await?;
        Self::reply(response).await
    }

    /// POST a multipart form and return status and text without judging the status.
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<HttpReply> {
        let response = self.client.post(url).multipart(form).send().await?;
        Self::reply(response).await
    }

    /// Start a GET whose body the caller will stream.
    pub async fn get_stream(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(OpenNeuroError::HttpError(response.status().as_u16()));
        }
        Ok(response)
    }

    async fn reply(response: Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_with_key_and_proxy() {
        let config = ClientConfig::default()
            .with_api_key("secret")
            .with_proxy("http://127.0.0.1:8080");
        assert!(HttpClient::from_config(&config).is_ok());
    }

    #[test]
    fn test_unparseable_proxy_is_config_error() {
        let config = ClientConfig::default().with_proxy(":::::::");
        match HttpClient::from_config(&config) {
            Err(OpenNeuroError::Config(message)) => assert!(message.starts_with("Invalid proxy")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_api_key_with_newline_rejected() {
        let config = ClientConfig::default().with_api_key("bad\nkey");
        assert!(matches!(
            HttpClient::from_config(&config),
            Err(OpenNeuroError::Config(_))
        ));
    }
}
