//! Upload operations.

use serde_json::json;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::api::upload::{PumpError, UploadPart};
use crate::api::client::field;
use crate::api::queries::UPDATE_FILES;
use crate::error::{OpenNeuroError, Result};
use crate::fs::handle::ByteStream;
use crate::fs::tree::FileTreeNode;
use crate::session::Session;

/// Object path of the tree inside the mutation variables.
const FILES_SLOT: &str = "variables.files";

impl Session {
    /// Submit an upload tree with `updateFiles`, streaming every file handle
    /// as its own multipart field.
    ///
    /// Each handle is drained on a scoped reader thread into a bounded channel
    /// that backs its request part, while `runtime` drives the request. A
    /// failing source is reported as [`OpenNeuroError::Stream`] in preference
    /// to whatever the aborted request returned. Nothing is retried.
    pub(crate) fn upload_tree<S: ByteStream + ?Sized>(
        &self,
        runtime: &Runtime,
        dataset_id: &str,
        tree: FileTreeNode<'_, S>,
    ) -> Result<String> {
        let wire = tree.into_wire(FILES_SLOT);
        let chunk_size = self.config().upload_chunk_size;
        let capacity = self.config().upload_buffer_chunks;

        std::thread::scope(|scope| {
            let mut parts = Vec::with_capacity(wire.files.len());
            let mut readers = Vec::with_capacity(wire.files.len());
            for (slot, mut handle) in wire.files {
                debug!(slot = %slot, name = handle.name(), "streaming upload part");
                let (part, sender) = UploadPart::channel(slot, handle.name(), capacity);
                parts.push(part);
                readers.push(scope.spawn(move || sender.pump(&mut handle, chunk_size)));
            }

            let variables = json!({
                "datasetId": dataset_id,
                "files": wire.value,
            });
            let outcome = runtime.block_on(self.graphql().execute_multipart(
                UPDATE_FILES,
                variables,
                Some("updateFiles"),
                parts,
            ));

            let mut uploaded = 0u64;
            for reader in readers {
                match reader.join() {
                    Ok(Ok(bytes)) => uploaded += bytes,
                    Ok(Err(PumpError::BodyDropped)) => {}
                    Ok(Err(PumpError::Source(e))) => return Err(OpenNeuroError::Stream(e)),
                    Err(_) => {
                        return Err(OpenNeuroError::Custom(
                            "upload stream reader panicked".to_string(),
                        ));
                    }
                }
            }

            let data = outcome?;
            let id = field(&data, "updateFiles")?
                .get("id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    OpenNeuroError::Protocol("updateFiles returned no dataset id".to_string())
                })?
                .to_string();

            info!(dataset = %id, bytes = uploaded, "upload complete");
            Ok(id)
        })
    }
}
