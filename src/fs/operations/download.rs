//! Listing and download operations.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::utils::{is_retryable, local_destination, pick_mirror};
use crate::error::{OpenNeuroError, Result};
use crate::fs::node::{DatasetFiles, DownloadReport, RemoteFile};
use crate::fs::path::LogicalPath;
use crate::session::Session;

impl Session {
    /// List the files of a draft (`version = None`) or of a snapshot.
    pub(crate) async fn files(
        &self,
        dataset_id: &str,
        version: Option<&str>,
    ) -> Result<Vec<RemoteFile>> {
        let url = self.config().download_url(dataset_id, version)?;
        debug!(url = %url, "listing dataset files");

        let response = timeout(self.config().request_timeout, self.http().get_json(&url))
            .await
            .map_err(|_| OpenNeuroError::Custom("HTTP request timed out".to_string()))??;
        let listing: DatasetFiles = serde_json::from_value(response)?;

        if listing.dataset_id != dataset_id {
            return Err(OpenNeuroError::Protocol(format!(
                "asked for {} but the server listed {}",
                dataset_id, listing.dataset_id
            )));
        }
        Ok(listing.files)
    }

    /// Download one file to a writer, returning the number of bytes written.
    ///
    /// A mirror is picked at random for each attempt. Attempts are repeated
    /// with a doubling delay only while nothing has been written yet; a
    /// failure mid-body is returned as is.
    pub(crate) async fn download_file<W: Write + ?Sized>(
        &self,
        file: &RemoteFile,
        writer: &mut W,
    ) -> Result<u64> {
        let mut delay = self.config().retry_delay;
        let mut attempt = 1;

        let mut response = loop {
            let url = pick_mirror(&file.urls).ok_or_else(|| {
                OpenNeuroError::Protocol(format!("no download URL for {}", file.filename))
            })?;
            match self.http().get_stream(url).await {
                Ok(response) => break response,
                Err(e) if attempt < self.config().download_attempts && is_retryable(&e) => {
                    warn!(
                        file = %file.filename,
                        attempt,
                        error = %e,
                        "download attempt failed, retrying"
                    );
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        writer.flush()?;

        if let Some(size) = file.size {
            if size != written {
                return Err(OpenNeuroError::Protocol(format!(
                    "{}: expected {} bytes, received {}",
                    file.filename, size, written
                )));
            }
        }

        debug!(file = %file.filename, bytes = written, "file downloaded");
        Ok(written)
    }

    /// Download every file of a draft or snapshot below `destination`.
    ///
    /// Only the listing is fatal. A file that cannot be fetched, or whose
    /// remote name is not a safe dataset-relative path, is recorded in the
    /// report and the remaining files are still attempted.
    pub(crate) async fn download_dataset(
        &self,
        dataset_id: &str,
        version: Option<&str>,
        destination: &Path,
    ) -> Result<DownloadReport> {
        let files = self.files(dataset_id, version).await?;
        let mut report = DownloadReport::default();

        for file in &files {
            match self.download_into(file, destination).await {
                Ok(()) => report.downloaded.push(file.filename.clone()),
                Err(e) => {
                    warn!(file = %file.filename, error = %e, "skipping file");
                    report.failed.push((file.filename.clone(), e));
                }
            }
        }

        info!(
            dataset = dataset_id,
            downloaded = report.downloaded.len(),
            failed = report.failed.len(),
            "dataset download finished"
        );
        Ok(report)
    }

    async fn download_into(&self, file: &RemoteFile, destination: &Path) -> Result<()> {
        let path = LogicalPath::parse(&file.filename)?;
        let target = local_destination(destination, &path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&target)?);
        let result = self.download_file(file, &mut writer).await;
        drop(writer);
        if result.is_err() {
            let _ = fs::remove_file(&target);
        }
        result.map(|_| ())
    }
}
