//! OpenNeuro GraphQL transport and types.

pub mod client;
pub mod error;
pub mod queries;
pub mod upload;

pub use client::GraphQlClient;
pub use error::{GraphQlError, GraphQlResponse};
pub use upload::{PumpError, UploadPart};
