//! Page-by-page download loop.
//!
//! Starting at page 1, each page is fetched, decoded, optionally filtered and
//! written to `<prefix_>page_<n>.json`. The loop ends on the first of:
//!
//! - an HTTP error response (no retry),
//! - a successful page with no contracts, judged before the filter runs,
//! - a page whose transient failures used up the sleep budget.
//!
//! A page the filter strips down to nothing is recorded but not written, and
//! the loop moves on to the next page.
//!
//! Decode, filter and save failures are fatal and returned as [`RunFailure`]
//! together with the records gathered so far.

use std::path::PathBuf;

use crate::config::{CspendConfig, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
use crate::error::{DownloadError, RunFailure};
use crate::fetch::{CurlFetcher, Fetch, PageResult};
use crate::filter::PageFilter;
use crate::page::DecodedPage;
use crate::params::SearchParams;
use crate::record::{DownloadRecord, DownloadRun, StopReason, EMPTY_MESSAGE, FILTERED_MESSAGE};
use crate::retry::{ErrorKind, RetryDecision, RetryPolicy, Sleeper, ThreadSleeper};
use crate::storage::{generate_filename, prepare_dir, save_json};

/// How one attempt ended, as seen by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Saved,
    Skipped,
    Empty,
    Failed(ErrorKind),
}

/// What [`Downloader::persist`] did with a successful body.
#[derive(Debug)]
enum Persisted {
    Saved(PathBuf),
    /// The filter left no contracts; nothing was written.
    Filtered,
    /// The API page itself had no contracts.
    Empty,
}

/// Mutable state of a single run.
#[derive(Debug)]
struct RunContext {
    page: u32,
    /// Consecutive sleeps on the current page; reset after every success.
    sleep_count: u32,
    records: Vec<DownloadRecord>,
}

impl RunContext {
    fn new() -> Self {
        Self {
            page: 1,
            sleep_count: 0,
            records: Vec::new(),
        }
    }

    fn finish(self, stop: StopReason) -> DownloadRun {
        DownloadRun {
            records: self.records,
            stop,
        }
    }

    fn fail(self, error: DownloadError) -> RunFailure {
        RunFailure {
            error,
            records: self.records,
        }
    }
}

/// Downloads every page of one search into an output directory.
pub struct Downloader<F, S = ThreadSleeper> {
    fetcher: F,
    sleeper: S,
    base_url: String,
    output_dir: PathBuf,
    file_prefix: Option<String>,
    per_page: u32,
    retry: RetryPolicy,
    filter: Option<Box<dyn PageFilter>>,
}

impl Downloader<CurlFetcher> {
    /// Production downloader: libcurl fetcher, thread sleeps, settings from `cfg`.
    pub fn from_config(cfg: &CspendConfig, output_dir: impl Into<PathBuf>) -> Self {
        Downloader::new(CurlFetcher::from_config(cfg), output_dir)
            .base_url(cfg.base_url.clone())
            .per_page(cfg.per_page)
            .retry_policy(cfg.retry_policy())
    }
}

impl<F: Fetch> Downloader<F> {
    pub fn new(fetcher: F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            sleeper: ThreadSleeper,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: output_dir.into(),
            file_prefix: None,
            per_page: DEFAULT_PER_PAGE,
            retry: RetryPolicy::default(),
            filter: None,
        }
    }
}

impl<F: Fetch, S: Sleeper> Downloader<F, S> {
    /// Replace the sleeper used between retries.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> Downloader<F, S2> {
        Downloader {
            fetcher: self.fetcher,
            sleeper,
            base_url: self.base_url,
            output_dir: self.output_dir,
            file_prefix: self.file_prefix,
            per_page: self.per_page,
            retry: self.retry,
            filter: self.filter,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn file_prefix(mut self, prefix: Option<String>) -> Self {
        self.file_prefix = prefix;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Transform each decoded page before it is saved.
    pub fn filter(mut self, filter: impl PageFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Where page `page` is written.
    pub fn page_path(&self, page: u32) -> PathBuf {
        self.output_dir
            .join(generate_filename(self.file_prefix.as_deref(), page))
    }

    /// Walk pages from 1 until an HTTP error, an empty page, or an exhausted
    /// retry budget. Every attempt is recorded.
    pub fn download_all(&mut self, params: &SearchParams) -> Result<DownloadRun, RunFailure> {
        let mut ctx = RunContext::new();
        tracing::info!(
            base_url = %self.base_url,
            dir = %self.output_dir.display(),
            "starting download"
        );

        loop {
            let (record, step) = self.download_page(ctx.page, params);
            ctx.records.push(record);

            let step = match step {
                Ok(step) => step,
                Err(error) => {
                    tracing::error!(page = ctx.page, "download stopped: {}", error);
                    return Err(ctx.fail(error));
                }
            };

            match step {
                Step::Saved | Step::Skipped => {
                    ctx.sleep_count = 0;
                    ctx.page += 1;
                }
                Step::Empty => return Ok(self.stop(ctx, StopReason::EmptyPage)),
                Step::Failed(kind) => match self.retry.decide(ctx.sleep_count, kind) {
                    RetryDecision::NoRetry => {
                        let reason = match kind {
                            ErrorKind::Terminal => StopReason::HttpError,
                            ErrorKind::Transient => StopReason::RetriesExhausted,
                        };
                        return Ok(self.stop(ctx, reason));
                    }
                    RetryDecision::RetryAfter(delay) => {
                        ctx.sleep_count += 1;
                        tracing::warn!(
                            page = ctx.page,
                            "transient failure, sleeping {:?} before retry {}/{}",
                            delay,
                            ctx.sleep_count,
                            self.retry.max_sleep_count
                        );
                        self.sleeper.sleep(delay);
                    }
                },
            }
        }
    }

    fn stop(&self, ctx: RunContext, reason: StopReason) -> DownloadRun {
        let saved = ctx.records.iter().filter(|r| r.filename.is_some()).count();
        tracing::info!(
            page = ctx.page,
            saved,
            attempts = ctx.records.len(),
            "download finished: {}",
            reason
        );
        ctx.finish(reason)
    }

    /// One attempt at `page`. The record is returned even when the step fails.
    fn download_page(
        &mut self,
        page: u32,
        params: &SearchParams,
    ) -> (DownloadRecord, Result<Step, DownloadError>) {
        let request = params.for_page(page, self.per_page);
        let PageResult { url, outcome } = self.fetcher.fetch(&self.base_url, &request);

        let mut record = DownloadRecord {
            page,
            url,
            status: outcome.status(),
            message: outcome.message().to_string(),
            filename: None,
        };

        let body = match outcome.into_body() {
            Ok(body) => body,
            Err(kind) => {
                tracing::warn!(page, status = %record.status, "{}", record.message);
                return (record, Ok(Step::Failed(kind)));
            }
        };

        match self.persist(page, &body) {
            Ok(Persisted::Saved(path)) => {
                record.filename = Some(path);
                (record, Ok(Step::Saved))
            }
            Ok(Persisted::Filtered) => {
                tracing::info!(page, "filter left no contracts, page not saved");
                record.message = FILTERED_MESSAGE.to_string();
                (record, Ok(Step::Skipped))
            }
            Ok(Persisted::Empty) => {
                tracing::info!(page, "empty page, no more results");
                record.message = EMPTY_MESSAGE.to_string();
                (record, Ok(Step::Empty))
            }
            Err(error) => {
                record.message = error.to_string();
                (record, Err(error))
            }
        }
    }

    /// Decode, filter and save a successful body. The end of results is read
    /// from the page as the API sent it, never from the filtered page.
    fn persist(&self, page: u32, body: &[u8]) -> Result<Persisted, DownloadError> {
        let decoded = DecodedPage::from_slice(body)
            .map_err(|source| DownloadError::Decode { page, source })?;
        if decoded.is_empty() {
            return Ok(Persisted::Empty);
        }

        let decoded = match &self.filter {
            Some(filter) => filter
                .apply(decoded)
                .map_err(|source| DownloadError::Filter { page, source })?,
            None => decoded,
        };

        if decoded.is_empty() {
            return Ok(Persisted::Filtered);
        }

        prepare_dir(&self.output_dir).map_err(|source| DownloadError::PrepareDir {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.page_path(page);
        save_json(decoded.value(), &path).map_err(|source| DownloadError::Save {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            page,
            api_page = ?decoded.page(),
            total = ?decoded.total(),
            contracts = decoded.contracts().map_or(0, Vec::len),
            "saved {}",
            path.display()
        );
        Ok(Persisted::Saved(path))
    }
}
