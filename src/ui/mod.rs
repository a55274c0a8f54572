//! UI panels for the library list and the document viewer

pub mod library;
pub mod viewer;
