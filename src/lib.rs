//! # openneuro
//!
//! Rust client library for the OpenNeuro neuroimaging dataset repository.
//!
//! ## Features
//!
//! - **Datasets**: create, inspect, delete, snapshot and publish datasets.
//! - **Metadata**: edit `dataset_description.json` fields.
//! - **Uploads**: stream one file per call into a dataset draft under an
//!   explicit dataset-relative path, independent of the local file name.
//! - **Downloads**: list draft or snapshot files, download single files, or
//!   mirror a whole dataset to disk while tolerating per-file failures.
//!
//! The public [`Client`] is blocking. Uploads use the GraphQL multipart request
//! convention: the destination is described by a nested [`FileTreeNode`]
//! whose nodes carry absolute directory paths, and file bytes travel as a
//! separate, streamed form field.
//!
//! ## Example
//!
//! ```no_run
//! use openneuro::{Client, ClientConfig, Sequential};
//!
//! # fn example() -> openneuro::Result<()> {
//! let client = Client::new(ClientConfig::from_env())?;
//!
//! // Upload from a local file under a different remote name
//! let mut file = std::fs::File::open("scan_0001.nii.gz")?;
//! client.upload_file("ds000001", &mut file, "sub-01/anat/sub-01_T1w.nii.gz")?;
//!
//! // Upload from stdin, which has no name or position of its own
//! let mut stdin = Sequential::new(std::io::stdin());
//! client.upload_file("ds000001", &mut stdin, "README")?;
//!
//! // Mirror the latest draft locally
//! let report = client.download_dataset("ds000001", None, "ds000001")?;
//! for (file, error) in &report.failed {
//!     eprintln!("{}: {}", file, error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fs;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use config::ClientConfig;
pub use dataset::{Dataset, Draft, Snapshot};
pub use error::{OpenNeuroError, Result};
pub use fs::{
    ByteStream, DownloadReport, FileTreeNode, LogicalPath, NamedFileHandle, RemoteFile,
    Sequential, build_file_tree,
};
pub use session::Client;
