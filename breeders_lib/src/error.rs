//! Error types for the library layer.

use std::fmt;

use crate::table::TableError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding table, input validation and page-load failures.
#[derive(Debug)]
pub enum BreedersError {
    /// An error from the underlying API client.
    Api(brapi_api::Error),
    /// A column declaration or table interaction was rejected.
    Table(TableError),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A page load task ended without producing a result.
    LoadAborted,
}

impl BreedersError {
    /// True when the API reported that the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }
}

impl fmt::Display for BreedersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Table(e) => write!(f, "Table error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::LoadAborted => write!(f, "Page load ended before a result was produced"),
        }
    }
}

impl std::error::Error for BreedersError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<brapi_api::Error> for BreedersError {
    fn from(e: brapi_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<TableError> for BreedersError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
