use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::FetchError;

/// Errors that stop a result document from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a local report file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to fetch a remote report.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Transport or body error.
        source: FetchError,
    },
    /// The document is not valid JSON.
    #[error("Invalid JSON in {origin}: {source}")]
    Parse {
        /// Path or URL the document came from.
        origin: String,
        /// JSON parse error.
        source: serde_json::Error,
    },
    /// The document parsed but its top level is not an object.
    #[error("Report {origin} must be a JSON object keyed by comparator")]
    NotAnObject {
        /// Path or URL the document came from.
        origin: String,
    },
}
