//! Session operations split into focused modules.

mod dataset;
mod download;
mod upload;
mod utils;
