//! Blocking GET via libcurl.

use std::str;
use std::time::Duration;

use super::classify::{classify_curl_error, http_error_message};
use super::{build_url, Fetch, FetchOutcome, PageResult};
use crate::config::{CspendConfig, DEFAULT_USER_AGENT};
use crate::params::SearchParams;

/// Fetches pages with one libcurl easy handle per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    /// Whole-request timeout; expiry becomes a connection error.
    timeout: Duration,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT, Duration::from_secs(60))
    }
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &CspendConfig) -> Self {
        Self::new(cfg.user_agent.clone(), cfg.timeout())
    }

    fn get(&self, url: &str) -> Result<FetchOutcome, curl::Error> {
        let mut body: Vec<u8> = Vec::new();
        let mut status_line: Option<String> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            // Redirects produce several status lines; keep the last.
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    if s.starts_with("HTTP/") {
                        status_line = Some(s.trim_end().to_string());
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Ok(FetchOutcome::HttpError(http_error_message(
                code,
                status_line.as_deref(),
            )));
        }
        Ok(FetchOutcome::Success(body))
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&mut self, base_url: &str, params: &SearchParams) -> PageResult {
        let url = build_url(base_url, params);
        tracing::debug!(url = %url, "GET");
        let outcome = match self.get(&url) {
            Ok(outcome) => outcome,
            Err(e) => classify_curl_error(&e),
        };
        PageResult { url, outcome }
    }
}
