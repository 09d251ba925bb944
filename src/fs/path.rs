//! Dataset-relative logical paths.

use std::fmt;
use std::str::FromStr;

use crate::error::{OpenNeuroError, Result};

/// A validated, slash-delimited path from a dataset root to a file.
///
/// The last component is the filename, the rest are directory names. No
/// component is empty, `.` or `..`, so a logical path can never point outside
/// the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath {
    components: Vec<String>,
}

impl LogicalPath {
    /// Parse and validate a path such as `sub-01/anat/T1w.nii.gz`.
    pub fn parse(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(OpenNeuroError::invalid_path(path, "path is empty"));
        }
        if path.ends_with('/') {
            return Err(OpenNeuroError::invalid_path(path, "trailing slash"));
        }

        let components = path
            .split('/')
            .map(|component| match component {
                "" => Err(OpenNeuroError::invalid_path(path, "empty path component")),
                "." | ".." => Err(OpenNeuroError::invalid_path(
                    path,
                    "relative path component",
                )),
                _ => Ok(component.to_string()),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// Directory components, outermost first. Empty for a file at the root.
    pub fn directories(&self) -> &[String] {
        &self.components[..self.components.len() - 1]
    }

    /// The final component.
    pub fn filename(&self) -> &str {
        &self.components[self.components.len() - 1]
    }

    /// Directory part joined with `/`, `""` at the root.
    pub fn parent(&self) -> String {
        self.directories().join("/")
    }

    /// Split into `(directories, filename)`.
    pub fn into_parts(mut self) -> (Vec<String>, String) {
        let filename = self.components.pop().unwrap_or_default();
        (self.components, filename)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.components.join("/"))
    }
}

impl FromStr for LogicalPath {
    type Err = OpenNeuroError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
