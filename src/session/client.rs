//! Blocking client for an OpenNeuro server.

use std::io::Write;
use std::path::Path;

use tokio::runtime::{Builder, Runtime};

use crate::config::ClientConfig;
use crate::dataset::{Dataset, Snapshot};
use crate::error::{OpenNeuroError, Result};
use crate::fs::{ByteStream, DownloadReport, LogicalPath, RemoteFile, build_file_tree};
use crate::session::Session;

/// Blocking OpenNeuro client.
///
/// Every call runs to completion before returning. The client owns a
/// single-threaded tokio runtime, so it must not be used from inside another
/// async runtime; call it from a plain thread (or `spawn_blocking`).
///
/// # Example
/// ```no_run
/// use openneuro::{Client, ClientConfig};
///
/// # fn example() -> openneuro::Result<()> {
/// let client = Client::new(ClientConfig::default().with_api_key("KEY"))?;
/// let mut file = std::fs::File::open("local_scan.nii.gz")?;
/// client.upload_file("ds000001", &mut file, "sub-01/anat/sub-01_T1w.nii.gz")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    runtime: Runtime,
    session: Session,
}

impl Client {
    /// Create a client from explicit settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Session::new(config)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| OpenNeuroError::Custom(format!("Failed to start runtime: {}", e)))?;
        Ok(Self { runtime, session })
    }

    /// Create a client configured from `OPENNEURO_URL` and `OPENNEURO_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        self.session.config()
    }

    /// Upload one file into a dataset draft.
    ///
    /// `destination` is the dataset-relative path the file will have, e.g.
    /// `sub-01/anat/sub-01_T1w.nii.gz`; its last component becomes the remote
    /// filename whatever `stream` is called locally. The stream is read once,
    /// sequentially, without being buffered whole. It is not closed.
    ///
    /// Returns the dataset id echoed by the server.
    ///
    /// A server that rejects the mutation before it has read the whole body
    /// may close the connection mid-upload. The transport then reports a send
    /// failure ([`OpenNeuroError::RequestError`]) and the GraphQL `errors` it
    /// answered with are lost; retrying with a small body surfaces them.
    pub fn upload_file<S: ByteStream + ?Sized>(
        &self,
        dataset_id: &str,
        stream: &mut S,
        destination: &str,
    ) -> Result<String> {
        let path = LogicalPath::parse(destination)?;
        let tree = build_file_tree(&path, stream);
        self.session.upload_tree(&self.runtime, dataset_id, tree)
    }

    pub fn dataset(&self, dataset_id: &str) -> Result<Dataset> {
        self.runtime.block_on(self.session.dataset(dataset_id))
    }

    /// Create an empty dataset and return its id.
    pub fn create_dataset(&self, label: &str) -> Result<String> {
        self.runtime.block_on(self.session.create_dataset(label))
    }

    pub fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
        self.runtime.block_on(self.session.delete_dataset(dataset_id))
    }

    /// Delete a file from a dataset draft.
    pub fn delete_file(&self, dataset_id: &str, path: &str) -> Result<()> {
        let path = LogicalPath::parse(path)?;
        self.runtime.block_on(self.session.delete_file(dataset_id, &path))
    }

    /// Set a `dataset_description.json` field, e.g. `Name` or `License`.
    pub fn update_description(&self, dataset_id: &str, field: &str, value: &str) -> Result<()> {
        self.runtime.block_on(self.session.update_description(dataset_id, field, value))
    }

    pub fn create_snapshot(
        &self,
        dataset_id: &str,
        tag: &str,
        changes: &[String],
    ) -> Result<Snapshot> {
        self.runtime.block_on(self.session.create_snapshot(dataset_id, tag, changes))
    }

    pub fn publish_dataset(&self, dataset_id: &str) -> Result<()> {
        self.runtime.block_on(self.session.publish_dataset(dataset_id))
    }

    /// List the files of the draft (`version = None`) or of a snapshot tag.
    pub fn files(&self, dataset_id: &str, version: Option<&str>) -> Result<Vec<RemoteFile>> {
        self.runtime.block_on(self.session.files(dataset_id, version))
    }

    /// Download one listed file to `writer`, returning the byte count.
    pub fn download_file<W: Write + ?Sized>(
        &self,
        file: &RemoteFile,
        writer: &mut W,
    ) -> Result<u64> {
        self.runtime.block_on(self.session.download_file(file, writer))
    }

    /// Download a whole draft or snapshot below `destination`, continuing past
    /// per-file failures.
    pub fn download_dataset(
        &self,
        dataset_id: &str,
        version: Option<&str>,
        destination: impl AsRef<Path>,
    ) -> Result<DownloadReport> {
        self.runtime.block_on(
            self.session.download_dataset(dataset_id, version, destination.as_ref()),
        )
    }
}
