//! Dataset and snapshot types returned by the GraphQL API.

use serde::{Deserialize, Serialize};

/// A dataset as returned by the `dataset` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Accession number, e.g. `ds000001`
    pub id: String,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub draft: Option<Draft>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

/// The mutable working copy of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    #[serde(default)]
    pub modified: Option<String>,
}

/// An immutable, tagged version of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub created: Option<String>,
}

impl Dataset {
    /// Most recent snapshot, by position in the server's list.
    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn snapshot(&self, tag: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.tag == tag)
    }
}
