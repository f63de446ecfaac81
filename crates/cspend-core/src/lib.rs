//! Paginated download of procurement-contract search results.
//!
//! A [`paginate::Downloader`] walks result pages from 1 upward, fetching each
//! with a [`fetch::Fetch`] implementation and persisting non-empty pages as
//! JSON files. Transient transport failures are retried after a fixed sleep;
//! an HTTP error or an empty page ends the run.

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod page;
pub mod paginate;
pub mod params;
pub mod record;
pub mod retry;
pub mod storage;

pub use error::{DownloadError, RunFailure};
pub use fetch::{CurlFetcher, Fetch, PageResult};
pub use page::DecodedPage;
pub use paginate::Downloader;
pub use params::{ParamValue, SearchParams};
pub use record::{DownloadRecord, DownloadRun, PageStatus, StopReason};
