use crate::schema::Schema;

mod meta;
pub use self::meta::{CollectionResult, Envelope, ListResponse, Metadata, Pagination, Status};

mod program;
pub use self::program::{AdditionalInfo, Program, ProgramDbId, ProgramType};

/// A named collection of records exposed at a stable URL path segment.
pub trait Resource: Schema {
    /// Path segment of the collection, e.g. `programs`.
    const PATH: &'static str;
}
