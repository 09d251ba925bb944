//! Shared helpers for file operations.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::error::OpenNeuroError;
use crate::fs::path::LogicalPath;

/// Pick one of a file's mirrors.
///
/// Uniformly random; no notion of mirror proximity.
pub(crate) fn pick_mirror(urls: &[String]) -> Option<&str> {
    urls.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Whether a failed download attempt is worth repeating.
pub(crate) fn is_retryable(error: &OpenNeuroError) -> bool {
    match error {
        OpenNeuroError::HttpError(status) => *status == 429 || *status >= 500,
        OpenNeuroError::RequestError(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Local destination of a dataset file below `root`.
pub(crate) fn local_destination(root: &Path, path: &LogicalPath) -> PathBuf {
    let mut destination = root.to_path_buf();
    destination.extend(path.directories());
    destination.push(path.filename());
    destination
}
