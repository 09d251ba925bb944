//! Remote file listing types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OpenNeuroError;

/// A file of a dataset draft or snapshot as listed by the download endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Dataset-relative path, e.g. `sub-01/anat/sub-01_T1w.nii.gz`
    pub filename: String,
    /// Mirrors serving the file contents
    #[serde(default)]
    pub urls: Vec<String>,
    /// File size in bytes, when the server reports it
    #[serde(default)]
    pub size: Option<u64>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Body of `GET /crn/datasets/{id}[/snapshots/{tag}]/download`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFiles {
    pub dataset_id: String,
    #[serde(default)]
    pub files: Vec<RemoteFile>,
}

/// Outcome of a whole-dataset download.
///
/// Per-file failures are collected instead of aborting the run.
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, by dataset-relative path
    pub downloaded: Vec<String>,
    /// Files that could not be fetched or written
    pub failed: Vec<(String, OpenNeuroError)>,
}

impl DownloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
