//! GraphQL response envelope and error entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OpenNeuroError, Result};

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Top-level GraphQL response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    /// Parse a response body.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Resolve the envelope to its `data` payload.
    ///
    /// Any error entry wins over data, since the server may return partial
    /// data together with errors for mutations that did not happen.
    pub fn into_data(self) -> Result<Value> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(OpenNeuroError::from_graphql(errors));
        }
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(OpenNeuroError::Protocol(
                "response carried neither data nor errors".to_string(),
            )),
        }
    }
}
