use std::time::Duration;

/// Classification of a failed fetch for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Ends the run at once (HTTP error response).
    Terminal,
    /// May succeed on the same page after waiting (truncated body, connection, timeout).
    Transient,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; stop the run.
    NoRetry,
    /// Retry the same page after the given delay.
    RetryAfter(Duration),
}

/// Fixed sleep-and-retry policy.
///
/// The sleep counter is consecutive per page: the paginator resets it after
/// every successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of sleeps before giving up on a page.
    pub max_sleep_count: u32,
    /// Pause before each retry.
    pub sleep: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_sleep_count: 3,
            sleep: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// `sleeps_taken` is how many sleeps already happened for the current page.
    pub fn decide(&self, sleeps_taken: u32, kind: ErrorKind) -> RetryDecision {
        match kind {
            ErrorKind::Terminal => RetryDecision::NoRetry,
            ErrorKind::Transient if sleeps_taken < self.max_sleep_count => {
                RetryDecision::RetryAfter(self.sleep)
            }
            ErrorKind::Transient => RetryDecision::NoRetry,
        }
    }

    /// Total attempts one page can receive: the first plus one per sleep.
    pub fn max_attempts(&self) -> u32 {
        self.max_sleep_count.saturating_add(1)
    }
}
