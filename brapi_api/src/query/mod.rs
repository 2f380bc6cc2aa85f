mod common;
pub use self::common::{PagedQuery, Query, QueryCommon, QueryParams};
mod program;
pub use self::program::ProgramQuery;
