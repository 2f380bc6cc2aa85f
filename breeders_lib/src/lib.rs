//! Library layer for the breeders app: page loads, the table column model,
//! and input validation on top of the `brapi_api` client.

pub mod error;
pub mod load;
pub mod programs;
pub mod table;
pub mod validation;

pub use brapi_api;
pub use brapi_api::types;
pub use brapi_api::{Client, PagedQuery, ProgramQuery, Query, QueryParams};

pub use error::BreedersError;
pub use load::{load_program, load_programs, LoadState, PageData, Pending};
pub use table::DataTable;
