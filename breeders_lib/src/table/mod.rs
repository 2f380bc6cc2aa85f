//! Declarative column model and the table state it renders against.
//!
//! Columns are declared once per record type. Header and cell generators are
//! pure functions of the state handed to them ([`HeaderContext`],
//! [`CellContext`]) and return a [`Render`] description instead of drawing
//! anything, so a column set can be exercised without a live UI.

mod column;
mod engine;

pub use self::column::{
    CellContext, CellFn, CheckState, ColumnDef, Header, HeaderContext, HeaderFn, Interaction,
    Render, SortDirection,
};
pub use self::engine::{ColumnSort, DataTable, RenderedRow, RenderedTable, TableError, TableOptions};

/// A validated record whose fields columns can read by name.
pub trait Record {
    /// Every field name an accessor column may reference.
    const FIELDS: &'static [&'static str];

    /// Display value of `key`. `None` when the record has no such field,
    /// `Some(None)` when the field exists but is null or absent.
    fn field(&self, key: &str) -> Option<Option<String>>;
}
