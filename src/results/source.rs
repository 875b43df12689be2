use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::error::LoadError;
use super::tree::ResultTree;
use crate::http_client;

/// Document loaded when neither the CLI nor the config names one.
pub const DEFAULT_REPORT_SOURCE: &str = "final_report.json";
/// Upper bound on a fetched report body.
const MAX_REPORT_BYTES: usize = 64 * 1024 * 1024;

/// Where the result document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportSource {
    Path(PathBuf),
    Url(Url),
}

impl ReportSource {
    /// `http(s)` URLs are fetched, `file://` URLs and anything else are read from disk.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ReportSource::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => ReportSource::Path(path),
                Err(()) => ReportSource::Path(PathBuf::from(raw)),
            },
            _ => ReportSource::Path(PathBuf::from(raw)),
        }
    }
}

impl Default for ReportSource {
    fn default() -> Self {
        ReportSource::Path(PathBuf::from(DEFAULT_REPORT_SOURCE))
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::Path(path) => write!(f, "{}", path.display()),
            ReportSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read or fetch the document once and build the tree.
pub fn load(source: &ReportSource) -> Result<ResultTree, LoadError> {
    let origin = source.to_string();
    let bytes = match source {
        ReportSource::Path(path) => std::fs::read(path).map_err(|err| LoadError::Read {
            path: path.clone(),
            source: err,
        })?,
        ReportSource::Url(url) => http_client::get_bytes(url.as_str(), MAX_REPORT_BYTES)
            .map_err(|err| LoadError::Fetch {
                url: url.to_string(),
                source: err,
            })?,
    };
    let value = serde_json::from_slice(&bytes).map_err(|err| LoadError::Parse {
        origin: origin.clone(),
        source: err,
    })?;
    let tree = ResultTree::from_value(value, &origin)?;
    tracing::info!(
        source = %origin,
        comparators = tree.comparator_count(),
        models = tree.model_count(),
        "Loaded result document"
    );
    Ok(tree)
}
