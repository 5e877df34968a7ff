//! Dataset loading.
//!
//! A [`DatasetSource`] yields the raw document bytes, either over HTTP
//! ([`HttpSource`]) or from disk ([`FileSource`]). [`DatasetLoader`] owns one
//! source, parses what it returns and memoizes the result for the session.
//! Any retrieval failure is absorbed by switching to the embedded
//! [`fallback_dataset`].

mod fallback;
mod loader;
mod source;
pub mod types;

pub use fallback::fallback_dataset;
pub use loader::DatasetLoader;
pub use source::{DatasetSource, FileSource, HttpSource, source_from};
pub use types::{Category, DataOrigin, Dataset, DatasetDocument, NetworkSummary, SchoolRecord};

use thiserror::Error;

/// Why the dataset document could not be adopted.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("source returned HTTP status {0}")]
    Status(u16),
    #[error("malformed dataset document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
}
