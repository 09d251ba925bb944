//! Error types for the openneuro library.

use thiserror::Error;

use crate::api::GraphQlError;

/// Main error type for openneuro operations.
#[derive(Error, Debug)]
pub enum OpenNeuroError {
    /// A dataset-relative path was malformed.
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The GraphQL response carried one or more error entries.
    #[error("Remote error: {message}")]
    RemoteMutation {
        message: String,
        errors: Vec<GraphQlError>,
    },

    /// The server answered with a payload of unexpected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Reading the local byte source failed during an upload.
    #[error("Stream error: {0}")]
    Stream(#[source] std::io::Error),

    /// HTTP request failed with status code and no usable body.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local filesystem error outside of an upload stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl OpenNeuroError {
    pub(crate) fn invalid_path(path: &str, reason: &'static str) -> Self {
        OpenNeuroError::InvalidPath {
            path: path.to_string(),
            reason,
        }
    }

    /// Build a remote error from the `errors` array of a GraphQL response.
    ///
    /// A single entry is unwrapped to its message; several are joined but all
    /// are kept in `errors`.
    pub(crate) fn from_graphql(errors: Vec<GraphQlError>) -> Self {
        let message = match errors.as_slice() {
            [single] => single.message.clone(),
            many => many
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        };
        OpenNeuroError::RemoteMutation { message, errors }
    }
}

/// Result type alias for openneuro operations.
pub type Result<T> = std::result::Result<T, OpenNeuroError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn gql(message: &str) -> GraphQlError {
        GraphQlError {
            message: message.to_string(),
            extensions: None,
        }
    }

    #[test]
    fn test_single_error_unwrapped() {
        let err = OpenNeuroError::from_graphql(vec![gql("not found")]);
        match &err {
            OpenNeuroError::RemoteMutation { message, errors } => {
                assert_eq!(message, "not found");
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Remote error: not found");
    }

    #[test]
    fn test_multiple_errors_preserved() {
        let err = OpenNeuroError::from_graphql(vec![gql("first"), gql("second")]);
        match err {
            OpenNeuroError::RemoteMutation { message, errors } => {
                assert_eq!(message, "first; second");
                assert_eq!(errors, vec![gql("first"), gql("second")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_path_display() {
        let err = OpenNeuroError::invalid_path("a/", "trailing slash");
        assert_eq!(err.to_string(), "Invalid path \"a/\": trailing slash");
    }
}
