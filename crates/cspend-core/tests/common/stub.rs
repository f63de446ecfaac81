//! In-process stand-ins for the transport and the retry sleeper.

use std::collections::VecDeque;
use std::time::Duration;

use cspend_core::fetch::{build_url, Fetch, FetchOutcome, PageResult};
use cspend_core::params::{ParamValue, SearchParams};
use cspend_core::retry::Sleeper;
use serde_json::json;

/// Replays a fixed list of outcomes; once the list runs out the last
/// outcome is repeated forever.
pub struct ScriptedFetcher {
    script: VecDeque<FetchOutcome>,
    last: Option<FetchOutcome>,
    pub requests: Vec<SearchParams>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<FetchOutcome>) -> Self {
        Self {
            script: script.into(),
            last: None,
            requests: Vec::new(),
        }
    }

    /// `page` value of every request made, in order.
    pub fn pages_requested(&self) -> Vec<i64> {
        self.requests
            .iter()
            .map(|p| match p.get("page") {
                Some(ParamValue::Int(n)) => *n,
                other => panic!("page param missing or not a number: {:?}", other),
            })
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.requests.len()
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&mut self, base_url: &str, params: &SearchParams) -> PageResult {
        self.requests.push(params.clone());
        let outcome = match self.script.pop_front() {
            Some(o) => {
                self.last = Some(o.clone());
                o
            }
            None => self.last.clone().expect("empty script"),
        };
        PageResult {
            url: build_url(base_url, params),
            outcome,
        }
    }
}

/// Records requested sleeps instead of blocking.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub sleeps: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

/// Search response body for `page` holding `count` contracts.
pub fn contracts_body(page: u32, count: usize) -> Vec<u8> {
    let data: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "regNum": format!("{:019}", page as usize * 100 + i),
                "price": 1000.0 + i as f64
            })
        })
        .collect();
    serde_json::to_vec(&json!({
        "contracts": { "page": page, "perpage": 50, "total": 150, "data": data }
    }))
    .unwrap()
}

pub fn success(page: u32, count: usize) -> FetchOutcome {
    FetchOutcome::Success(contracts_body(page, count))
}

pub fn http_404() -> FetchOutcome {
    FetchOutcome::HttpError("HTTP Error 404: Not Found".into())
}

pub fn connection_error() -> FetchOutcome {
    FetchOutcome::ConnectionError("Failed to connect to host".into())
}

pub fn incomplete() -> FetchOutcome {
    FetchOutcome::IncompleteData("Transferred a partial file".into())
}
