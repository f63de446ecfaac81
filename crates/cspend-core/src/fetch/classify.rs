//! Map curl errors and HTTP status lines into fetch outcomes.

use super::FetchOutcome;

/// Classify a curl transport error. Partial transfers are incomplete data;
/// everything else counts as a connection error so it is retried, never
/// propagated.
pub fn classify_curl_error(e: &curl::Error) -> FetchOutcome {
    let msg = e.to_string();
    if e.is_partial_file() {
        return FetchOutcome::IncompleteData(msg);
    }
    tracing::debug!(code = e.code(), "curl error treated as connection error: {}", msg);
    FetchOutcome::ConnectionError(msg)
}

/// `HTTP Error <code>: <reason>` from the code and the last status line seen.
pub fn http_error_message(code: u32, status_line: Option<&str>) -> String {
    let reason = status_line
        .and_then(|line| line.trim().splitn(3, ' ').nth(2))
        .map(str::trim)
        .filter(|r| !r.is_empty());
    match reason {
        Some(r) => format!("HTTP Error {}: {}", code, r),
        None => format!("HTTP Error {}", code),
    }
}
