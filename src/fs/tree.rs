//! Upload file trees.
//!
//! The `updateFiles` mutation takes one `FileTree` argument describing where
//! the uploaded file lands. Folders are resolved by their absolute path, not
//! by position in the tree, so every node carries the full path from the
//! dataset root (`""` for the root itself).

use serde_json::{Value, json};

use crate::fs::handle::{ByteStream, NamedFileHandle};
use crate::fs::path::LogicalPath;

/// One directory level of an upload tree.
#[derive(Debug)]
pub struct FileTreeNode<'a, S: ?Sized> {
    /// Absolute path of this directory, `""` for the dataset root
    pub path: String,
    pub files: Vec<NamedFileHandle<'a, S>>,
    pub directories: Vec<FileTreeNode<'a, S>>,
}

/// Tree JSON with file handles lifted out and replaced by `null`.
#[derive(Debug)]
pub struct WireTree<'a, S: ?Sized> {
    pub value: Value,
    /// Each handle with the object path of its `null` slot.
    pub files: Vec<(String, NamedFileHandle<'a, S>)>,
}

impl<'a, S: ByteStream + ?Sized> FileTreeNode<'a, S> {
    fn directory(path: String, child: FileTreeNode<'a, S>) -> Self {
        Self {
            path,
            files: Vec::new(),
            directories: vec![child],
        }
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .directories
            .iter()
            .map(FileTreeNode::node_count)
            .sum::<usize>()
    }

    /// Total number of file handles in the tree.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .iter()
                .map(FileTreeNode::file_count)
                .sum::<usize>()
    }

    /// Serialize for the multipart request, rooted at object path `slot`.
    ///
    /// Produces `{name, files: [null, ..], directories: [..]}` where `name` is
    /// the node's absolute path.
    pub fn into_wire(self, slot: &str) -> WireTree<'a, S> {
        let mut files = Vec::new();
        let value = self.lift(slot, &mut files);
        WireTree { value, files }
    }

    fn lift(self, slot: &str, out: &mut Vec<(String, NamedFileHandle<'a, S>)>) -> Value {
        let markers: Vec<Value> = self
            .files
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                out.push((format!("{slot}.files.{index}"), handle));
                Value::Null
            })
            .collect();

        let directories: Vec<Value> = self
            .directories
            .into_iter()
            .enumerate()
            .map(|(index, child)| child.lift(&format!("{slot}.directories.{index}"), out))
            .collect();

        json!({
            "name": self.path,
            "files": markers,
            "directories": directories,
        })
    }
}

/// Build the upload tree placing `stream` at `path` under the name of the
/// path's final component.
///
/// The leaf is created first and wrapped one parent at a time, deepest
/// directory first, since each parent's path is the prefix that excludes the
/// directory it wraps.
pub fn build_file_tree<'a, S: ByteStream + ?Sized>(
    path: &LogicalPath,
    stream: &'a mut S,
) -> FileTreeNode<'a, S> {
    let directories = path.directories();
    let leaf = FileTreeNode {
        path: directories.join("/"),
        files: vec![NamedFileHandle::new(path.filename(), stream)],
        directories: Vec::new(),
    };

    (0..directories.len()).rfold(leaf, |child, depth| {
        FileTreeNode::directory(directories[..depth].join("/"), child)
    })
}
