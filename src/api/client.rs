//! GraphQL client with request/response handling.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tokio::time::timeout;
use tracing::debug;

use crate::api::error::GraphQlResponse;
use crate::api::upload::{UploadPart, operations_document, upload_map};
use crate::error::{OpenNeuroError, Result};
use crate::http::{HttpClient, HttpReply};

/// GraphQL client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: HttpClient,
    endpoint: String,
    request_timeout: Duration,
}

impl GraphQlClient {
    pub fn new(http: HttpClient, endpoint: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            request_timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a query or mutation and return its `data`.
    ///
    /// The HTTP status is not trusted: the body is inspected for `errors`
    /// first, and only a body that is not a GraphQL envelope falls back to
    /// the status code.
    pub async fn execute(
        &self,
        query: &str,
        variables: Value,
        operation_name: Option<&str>,
    ) -> Result<Value> {
        let document = operations_document(query, variables, operation_name);
        debug!(
            operation = operation_name.unwrap_or(""),
            endpoint = %self.endpoint,
            "graphql request"
        );

        let reply = timeout(self.request_timeout, self.http.post_json(&self.endpoint, &document))
            .await
            .map_err(|_| OpenNeuroError::Custom("HTTP request timed out".to_string()))??;

        Self::resolve(reply)
    }

    /// Execute a mutation whose variables contain file slots, following the
    /// GraphQL multipart request convention.
    ///
    /// `variables` must already hold `null` at every slot named by `parts`.
    /// No timeout is applied since the duration depends on the stream.
    pub async fn execute_multipart(
        &self,
        query: &str,
        variables: Value,
        operation_name: Option<&str>,
        parts: Vec<UploadPart>,
    ) -> Result<Value> {
        let document = operations_document(query, variables, operation_name);
        let map = upload_map(&parts);
        debug!(
            operation = operation_name.unwrap_or(""),
            files = parts.len(),
            map = %map,
            "graphql multipart request"
        );

        let mut form = Form::new()
            .text("operations", serde_json::to_string(&document)?)
            .text("map", serde_json::to_string(&map)?);
        for (index, part) in parts.into_iter().enumerate() {
            let file = Part::stream(part.body)
                .file_name(part.filename)
                .mime_str("application/octet-stream")?;
            form = form.part(index.to_string(), file);
        }

        let reply = self.http.post_multipart(&self.endpoint, form).await?;
        Self::resolve(reply)
    }

    fn resolve(reply: HttpReply) -> Result<Value> {
        debug!(status = reply.status, bytes = reply.body.len(), "graphql response");
        match GraphQlResponse::parse(&reply.body) {
            Ok(response) => response.into_data(),
            Err(_) if !(200..300).contains(&reply.status) => {
                Err(OpenNeuroError::HttpError(reply.status))
            }
            Err(e) => Err(e),
        }
    }
}

/// Pull `data.<field>` out of a resolved payload.
pub(crate) fn field<'a>(data: &'a Value, name: &str) -> Result<&'a Value> {
    data.get(name)
        .ok_or_else(|| OpenNeuroError::Protocol(format!("response is missing field {}", name)))
}

/// Variables object with a single dataset id, the most common shape.
pub(crate) fn dataset_variables(dataset_id: &str) -> Value {
    json!({ "datasetId": dataset_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> HttpReply {
        HttpReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_errors_surface_despite_200() {
        let result = GraphQlClient::resolve(reply(200, r#"{"errors":[{"message":"not found"}]}"#));
        match result {
            Err(OpenNeuroError::RemoteMutation { message, .. }) => assert_eq!(message, "not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_errors_surface_despite_400() {
        let result = GraphQlClient::resolve(reply(400, r#"{"errors":[{"message":"bad input"}]}"#));
        assert!(matches!(result, Err(OpenNeuroError::RemoteMutation { .. })));
    }

    #[test]
    fn test_non_json_failure_uses_status() {
        let result = GraphQlClient::resolve(reply(502, "<html>Bad Gateway</html>"));
        assert!(matches!(result, Err(OpenNeuroError::HttpError(502))));
    }

    #[test]
    fn test_non_json_success_is_json_error() {
        let result = GraphQlClient::resolve(reply(200, "ok"));
        assert!(matches!(result, Err(OpenNeuroError::JsonError(_))));
    }

    #[test]
    fn test_field_lookup() {
        let data = json!({ "createDataset": { "id": "ds000001" } });
        assert_eq!(field(&data, "createDataset").unwrap()["id"], "ds000001");
        assert!(matches!(
            field(&data, "missing"),
            Err(OpenNeuroError::Protocol(_))
        ));
    }
}
