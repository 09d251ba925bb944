//! Dataset file model: paths, byte sources, upload trees and listings.

pub mod handle;
pub(crate) mod node;
mod operations;
pub mod path;
pub mod tree;

pub use handle::{ByteStream, NamedFileHandle, Sequential};
pub use node::{DatasetFiles, DownloadReport, RemoteFile};
pub use path::LogicalPath;
pub use tree::{FileTreeNode, WireTree, build_file_tree};
