//! Single-page HTTP fetch against the search endpoint.
//!
//! [`Fetch`] is the seam the paginator drives; [`CurlFetcher`] is the libcurl
//! implementation. A fetch never returns `Err`: every transport outcome is
//! folded into a [`PageResult`] variant and the caller's retry policy decides
//! what to do with it.

mod classify;
mod http;

pub use classify::{classify_curl_error, http_error_message};
pub use self::http::CurlFetcher;

use crate::params::SearchParams;
use crate::record::PageStatus;
use crate::retry::ErrorKind;

/// Outcome of one fetch attempt, with the URL that was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub outcome: FetchOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response; raw body bytes.
    Success(Vec<u8>),
    /// Non-2xx response, with the server's status text.
    HttpError(String),
    /// Body shorter than announced.
    IncompleteData(String),
    /// Connect, DNS, timeout or any other transport failure.
    ConnectionError(String),
}

impl FetchOutcome {
    pub fn status(&self) -> PageStatus {
        match self {
            FetchOutcome::Success(_) => PageStatus::Success,
            FetchOutcome::HttpError(_) => PageStatus::HttpError,
            FetchOutcome::IncompleteData(_) => PageStatus::IncompleteData,
            FetchOutcome::ConnectionError(_) => PageStatus::ConnectionError,
        }
    }

    /// Body of a successful fetch, or the retry classification of the failure.
    pub fn into_body(self) -> Result<Vec<u8>, ErrorKind> {
        match self {
            FetchOutcome::Success(body) => Ok(body),
            FetchOutcome::HttpError(_) => Err(ErrorKind::Terminal),
            FetchOutcome::IncompleteData(_) | FetchOutcome::ConnectionError(_) => {
                Err(ErrorKind::Transient)
            }
        }
    }

    /// Failure text; empty for success.
    pub fn message(&self) -> &str {
        match self {
            FetchOutcome::Success(_) => "",
            FetchOutcome::HttpError(m)
            | FetchOutcome::IncompleteData(m)
            | FetchOutcome::ConnectionError(m) => m,
        }
    }
}

/// Performs one GET for a parameter set.
pub trait Fetch {
    fn fetch(&mut self, base_url: &str, params: &SearchParams) -> PageResult;
}

impl<F: Fetch + ?Sized> Fetch for &mut F {
    fn fetch(&mut self, base_url: &str, params: &SearchParams) -> PageResult {
        (**self).fetch(base_url, params)
    }
}

/// Request URL: the encoded query appended verbatim to `base_url`.
pub fn build_url(base_url: &str, params: &SearchParams) -> String {
    let mut url = String::with_capacity(base_url.len() + 64);
    url.push_str(base_url);
    url.push_str(&params.to_query());
    url
}
