//! Error types for the API client.

use crate::schema::SchemaViolation;

/// Errors that can occur when making API requests.
///
/// `RequestFailed` and `HttpStatus` are transport failures; the other two
/// describe what the server sent back.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent, or the body could not be read.
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response did not match the declared shape.
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
    /// A single-record lookup came back with an empty `result` object.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
}

impl Error {
    /// True for network failures and non-2xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RequestFailed(_) | Error::HttpStatus { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
