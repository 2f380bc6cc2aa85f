//! Client for BrAPI v2 servers with runtime response validation.
//!
//! Responses are parsed into raw JSON, unwrapped from the
//! `{ metadata, result }` envelope and validated against each resource's
//! declared [`Schema`] before typed records are handed to callers.

mod client;
mod errors;
mod query;
pub mod schema;
pub mod types;
pub use self::client::{Client, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{PagedQuery, ProgramQuery, Query, QueryCommon, QueryParams};
pub use self::schema::{Schema, SchemaViolation};
