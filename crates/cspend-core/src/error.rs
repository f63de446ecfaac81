//! Fatal errors of a download run.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::DownloadRecord;

/// Boxed error returned by a page filter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that end a run. Fetch failures are not listed here: they are page
/// statuses handled by the retry policy.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    PrepareDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error on saving {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("page {page}: response is not valid JSON: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("page {page}: unable to filter search response: {source}")]
    Filter {
        page: u32,
        #[source]
        source: BoxError,
    },
}

/// A fatal error together with every record gathered before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    #[source]
    pub error: DownloadError,
    pub records: Vec<DownloadRecord>,
}
