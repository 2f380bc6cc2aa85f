//! The response envelope shared by every BrAPI endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{null_as_default, Schema};

/// Outer wrapper of every response: `{ metadata, result }`.
///
/// `result` is kept as raw JSON here; the client decides whether it is a
/// collection (`{ data: [...] }`) or a single record.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub result: Value,
}

impl Schema for Envelope {
    const NAME: &'static str = "Envelope";
}

/// Envelope metadata. A `null` section reads as if it were absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
    /// Informational messages attached by the server.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Vec<Status>,
}

/// One page of a collection result. Absent fields take their defaults.
///
/// `total_pages` is whatever the server reported; it is never recomputed
/// from `total_count` and `page_size`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 0,
            page_size: 10,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl Schema for Pagination {
    const NAME: &'static str = "Pagination";

    fn check(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("pageSize must be positive".to_string());
        }
        Ok(())
    }
}

/// A server status message, e.g. `{"message": "Request accepted", "messageType": "INFO"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub message: String,
    pub message_type: String,
}

/// The `result` object of a collection response.
#[derive(Deserialize, Debug)]
pub struct CollectionResult {
    pub data: Vec<Value>,
}

impl Schema for CollectionResult {
    const NAME: &'static str = "Envelope";
}

/// A validated page of records together with the server's pagination.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListResponse<R> {
    pub pagination: Pagination,
    pub status: Vec<Status>,
    pub data: Vec<R>,
}
