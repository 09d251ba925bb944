//! GraphQL multipart request convention.
//!
//! A multipart upload carries three kinds of form fields, in order:
//!
//! - `operations`: the usual `{query, variables, operationName}` document, with
//!   `null` wherever a file belongs,
//! - `map`: `{"0": ["variables.files.files.0"], ...}` naming, for each file
//!   field, the object path of the `null` it replaces,
//! - `0`, `1`, ...: the file contents.
//!
//! File bodies are fed through a bounded channel so a blocking reader can
//! stream into the request without the whole file ever sitting in memory.

use std::io::{self, Read};

use futures::Stream;
use futures::stream;
use reqwest::Body;
use serde_json::{Map, Value, json};
use tokio::sync::mpsc;

/// A file field of a multipart GraphQL request.
#[derive(Debug)]
pub struct UploadPart {
    /// Object path of the file slot, e.g. `variables.files.files.0`
    pub slot: String,
    /// Filename reported for the part
    pub filename: String,
    /// Streamed part contents
    pub body: Body,
}

/// Producer side of a channel-backed [`UploadPart`] body.
#[derive(Debug)]
pub struct ChunkSender {
    tx: mpsc::Sender<io::Result<Vec<u8>>>,
}

impl UploadPart {
    /// Create a part whose body is fed chunk by chunk through the returned sender.
    ///
    /// At most `capacity` chunks are buffered; the sender blocks beyond that.
    pub fn channel(
        slot: impl Into<String>,
        filename: impl Into<String>,
        capacity: usize,
    ) -> (Self, ChunkSender) {
        let (sender, chunks) = chunk_channel(capacity);
        let part = Self {
            slot: slot.into(),
            filename: filename.into(),
            body: Body::wrap_stream(chunks),
        };
        (part, sender)
    }
}

/// Bounded chunk channel: a blocking producer and an async stream consumer.
pub fn chunk_channel(
    capacity: usize,
) -> (
    ChunkSender,
    impl Stream<Item = io::Result<Vec<u8>>> + Send + 'static,
) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let chunks = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });
    (ChunkSender { tx }, chunks)
}

impl ChunkSender {
    /// Read `reader` to exhaustion, forwarding it in chunks of `chunk_size` bytes.
    ///
    /// Must be called off the async runtime. Returns the byte count on success.
    /// A read error is forwarded to the body (so the request aborts) and returned
    /// as [`PumpError::Source`].
    pub fn pump<R: Read + ?Sized>(
        self,
        reader: &mut R,
        chunk_size: usize,
    ) -> Result<u64, PumpError> {
        let mut total = 0u64;
        loop {
            let mut buffer = vec![0u8; chunk_size];
            let read = match reader.read(&mut buffer) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let _ = self
                        .tx
                        .blocking_send(Err(io::Error::new(e.kind(), e.to_string())));
                    return Err(PumpError::Source(e));
                }
            };
            buffer.truncate(read);
            total += read as u64;
            if self.tx.blocking_send(Ok(buffer)).is_err() {
                return Err(PumpError::BodyDropped);
            }
        }
    }
}

/// Why [`ChunkSender::pump`] stopped early.
#[derive(Debug)]
pub enum PumpError {
    /// The source failed to read
    Source(io::Error),
    /// The request stopped consuming the body, so the request's own outcome
    /// explains the failure
    BodyDropped,
}

/// Build the `operations` document.
pub fn operations_document(query: &str, variables: Value, operation_name: Option<&str>) -> Value {
    let mut document = json!({
        "query": query,
        "variables": variables,
    });
    if let Some(name) = operation_name {
        document["operationName"] = json!(name);
    }
    document
}

/// Build the `map` field linking each file field to its slot.
pub fn upload_map(parts: &[UploadPart]) -> Value {
    let mut map = Map::new();
    for (index, part) in parts.iter().enumerate() {
        map.insert(index.to_string(), json!([part.slot]));
    }
    Value::Object(map)
}
