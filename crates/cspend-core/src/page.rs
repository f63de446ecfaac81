//! Accessors over a decoded search response.

use serde_json::Value;

/// A decoded result page, shaped `{ "contracts": { "page", "total", "data": [...] } }`.
///
/// Nothing is validated on construction; accessors return `None` when the
/// expected keys are missing.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPage(pub Value);

impl DecodedPage {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes).map(DecodedPage)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `contracts.page` as reported by the API.
    pub fn page(&self) -> Option<u64> {
        self.0.pointer("/contracts/page").and_then(Value::as_u64)
    }

    /// `contracts.total`: number of matching contracts across all pages.
    pub fn total(&self) -> Option<u64> {
        self.0.pointer("/contracts/total").and_then(Value::as_u64)
    }

    /// `contracts.data`, if present and an array.
    pub fn contracts(&self) -> Option<&Vec<Value>> {
        self.0.pointer("/contracts/data").and_then(Value::as_array)
    }

    /// True when the page signals the end of results: the document itself is
    /// empty (null, `{}`, `[]`) or `contracts.data` is an empty array.
    ///
    /// A non-empty document without a `contracts.data` array is not empty; it
    /// is persisted as-is.
    pub fn is_empty(&self) -> bool {
        let doc_empty = match &self.0 {
            Value::Null => true,
            Value::Object(m) => m.is_empty(),
            Value::Array(a) => a.is_empty(),
            _ => false,
        };
        doc_empty || self.contracts().is_some_and(|c| c.is_empty())
    }
}
