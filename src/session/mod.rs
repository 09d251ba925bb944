//! Connection state and the public blocking client.

mod client;
mod session;

pub use client::Client;
pub(crate) use session::Session;
