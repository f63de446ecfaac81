//! Per-attempt audit records and the overall run outcome.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome tag of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Success,
    HttpError,
    IncompleteData,
    ConnectionError,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Success => "success",
            PageStatus::HttpError => "http_error",
            PageStatus::IncompleteData => "incomplete_data",
            PageStatus::ConnectionError => "connection_error",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Message stored for a successful page that carried no contracts.
pub const EMPTY_MESSAGE: &str = "empty";

/// Message stored for a page whose contracts were all dropped by the filter.
pub const FILTERED_MESSAGE: &str = "filtered";

/// One entry per attempted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    pub page: u32,
    pub url: String,
    pub status: PageStatus,
    /// Empty for a saved page, [`EMPTY_MESSAGE`] for an empty page,
    /// [`FILTERED_MESSAGE`] for a page the filter emptied, failure text otherwise.
    pub message: String,
    /// Set only when the page was written to disk.
    pub filename: Option<PathBuf>,
}

/// Why the pagination loop ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The API answered with an HTTP error.
    HttpError,
    /// A successful page carried no contracts.
    EmptyPage,
    /// Transient failures on one page used up the sleep budget.
    RetriesExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::HttpError => "http error",
            StopReason::EmptyPage => "empty page",
            StopReason::RetriesExhausted => "retries exhausted",
        };
        f.write_str(s)
    }
}

/// Result of a run that ended without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRun {
    pub records: Vec<DownloadRecord>,
    pub stop: StopReason,
}

impl DownloadRun {
    /// Files written during the run, in page order.
    pub fn saved_files(&self) -> Vec<&PathBuf> {
        self.records.iter().filter_map(|r| r.filename.as_ref()).collect()
    }

    /// Highest page number that was written to disk.
    pub fn last_saved_page(&self) -> Option<u32> {
        self.records
            .iter()
            .filter(|r| r.filename.is_some())
            .map(|r| r.page)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_are_stable() {
        assert_eq!(PageStatus::Success.as_str(), "success");
        assert_eq!(PageStatus::HttpError.to_string(), "http_error");
        assert_eq!(
            serde_json::to_string(&PageStatus::IncompleteData).unwrap(),
            "\"incomplete_data\""
        );
        assert_eq!(
            serde_json::to_string(&PageStatus::ConnectionError).unwrap(),
            "\"connection_error\""
        );
    }

    #[test]
    fn saved_files_skips_unsaved_records() {
        let rec = |page, filename: Option<&str>| DownloadRecord {
            page,
            url: format!("http://x/?page={}", page),
            status: PageStatus::Success,
            message: String::new(),
            filename: filename.map(PathBuf::from),
        };
        let run = DownloadRun {
            records: vec![
                rec(1, Some("page_1.json")),
                rec(2, Some("page_2.json")),
                rec(3, None),
            ],
            stop: StopReason::EmptyPage,
        };
        assert_eq!(run.saved_files().len(), 2);
        assert_eq!(run.last_saved_page(), Some(2));
    }
}
