//! Core functionality: document records, persistence, catalog, preview,
//! and upload handling

pub mod blob;
pub mod catalog;
pub mod preview;
pub mod record;
pub mod render;
pub mod storage;
pub mod store;
pub mod upload;
