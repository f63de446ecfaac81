//! Caller-supplied search parameters and query-string encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single query value: free text or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

/// Ordered search parameters. Keys keep their first-insertion position;
/// setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    entries: Vec<(String, ParamValue)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SearchParams::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of these params with `page` and `perpage` set for one request.
    pub fn for_page(&self, page: u32, per_page: u32) -> SearchParams {
        self.clone().with("page", page).with("perpage", per_page)
    }

    /// `application/x-www-form-urlencoded` query string (no leading `?`).
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            serializer.append_pair(k, &v.to_string());
        }
        serializer.finish()
    }

    /// Parse `key=value`. Values that print back identically as an integer
    /// become [`ParamValue::Int`]; anything else (including `007`) stays text.
    pub fn parse_pair(pair: &str) -> Option<(String, ParamValue)> {
        let (k, v) = pair.split_once('=')?;
        let k = k.trim();
        if k.is_empty() {
            return None;
        }
        let value = match v.parse::<i64>() {
            Ok(n) if n.to_string() == v => ParamValue::Int(n),
            _ => ParamValue::Str(v.to_string()),
        };
        Some((k.to_string(), value))
    }
}
