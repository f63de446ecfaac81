//! Retry policy for page fetches.
//!
//! Classifies fetch failures as terminal or transient and decides whether a
//! transient failure earns another attempt after a fixed sleep. The sleep
//! itself goes through [`Sleeper`] so callers can substitute a recorder.

mod policy;
mod sleep;

pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use sleep::{Sleeper, ThreadSleeper};
