use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Direction of an active column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Visual state of a selection checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Unchecked,
    Checked,
    /// Some, but not all, rows on the page are selected.
    Indeterminate,
}

/// A state change a rendered control triggers when activated.
///
/// Checkbox interactions carry the value the control switches to, which is
/// decided at render time from the state the generator saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    ToggleSorting { column: String },
    ToggleAllPageRows { value: bool },
    ToggleRow { row: usize, value: bool },
}

/// Description of what a header or cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Render {
    Empty,
    Text { text: String },
    /// Text wrapped in a presentation class, e.g. `font-medium`.
    Styled { class: &'static str, text: String },
    /// A clickable header label that cycles the column's sort.
    SortToggle {
        label: &'static str,
        sorted: Option<SortDirection>,
        on_click: Interaction,
    },
    Checkbox {
        state: CheckState,
        label: &'static str,
        on_change: Interaction,
    },
    /// A row-scoped actions menu keyed by an identifying value.
    Actions { name: String },
}

impl Render {
    pub fn text(text: impl Into<String>) -> Self {
        Render::Text { text: text.into() }
    }

    /// Plain-text rendering for terminals and CSV.
    pub fn to_plain(&self) -> String {
        match self {
            Render::Empty => String::new(),
            Render::Text { text } | Render::Styled { text, .. } => text.clone(),
            Render::SortToggle { label, sorted, .. } => match sorted {
                Some(SortDirection::Asc) => format!("{} ^", label),
                Some(SortDirection::Desc) => format!("{} v", label),
                None => label.to_string(),
            },
            Render::Checkbox { state, .. } => match state {
                CheckState::Checked => "[x]".to_string(),
                CheckState::Unchecked => "[ ]".to_string(),
                CheckState::Indeterminate => "[-]".to_string(),
            },
            Render::Actions { .. } => "...".to_string(),
        }
    }
}

/// State handed to a header generator.
#[derive(Debug, Clone)]
pub struct HeaderContext<'a> {
    pub column_id: &'a str,
    pub sorted: Option<SortDirection>,
    pub can_sort: bool,
    pub all_page_rows_selected: bool,
    pub some_page_rows_selected: bool,
}

impl HeaderContext<'_> {
    pub fn toggle_sorting(&self) -> Interaction {
        Interaction::ToggleSorting {
            column: self.column_id.to_string(),
        }
    }
}

/// State handed to a cell generator.
#[derive(Debug)]
pub struct CellContext<'a, R> {
    /// Position of the row in the table's original row order.
    pub row_index: usize,
    /// The validated record behind the row.
    pub original: &'a R,
    /// The accessor value, for accessor columns.
    pub value: Option<String>,
    pub selected: bool,
}

pub type HeaderFn = Arc<dyn Fn(&HeaderContext<'_>) -> Render + Send + Sync>;
pub type CellFn<R> = Arc<dyn Fn(&CellContext<'_, R>) -> Render + Send + Sync>;

/// Header content of a column.
#[derive(Clone)]
pub enum Header {
    Empty,
    Label(&'static str),
    Custom(HeaderFn),
}

impl Header {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&HeaderContext<'_>) -> Render + Send + Sync + 'static,
    {
        Header::Custom(Arc::new(f))
    }

    /// A label that toggles the column's sort when clicked. Falls back to a
    /// plain label when the column cannot sort.
    pub fn sortable(label: &'static str) -> Self {
        Header::custom(move |ctx| {
            if !ctx.can_sort {
                return Render::text(label);
            }
            Render::SortToggle {
                label,
                sorted: ctx.sorted,
                on_click: ctx.toggle_sorting(),
            }
        })
    }

    pub(crate) fn render(&self, ctx: &HeaderContext<'_>) -> Render {
        match self {
            Header::Empty => Render::Empty,
            Header::Label(label) => Render::text(*label),
            Header::Custom(f) => f(ctx),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Empty => write!(f, "Empty"),
            Header::Label(label) => write!(f, "Label({:?})", label),
            Header::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One column declaration.
///
/// Capability flags left as `None` fall back to the table's
/// [`TableOptions`](super::TableOptions).
pub struct ColumnDef<R> {
    pub id: String,
    /// Record field the column reads. Accessor-less columns must supply a cell.
    pub accessor_key: Option<&'static str>,
    pub header: Header,
    pub cell: Option<CellFn<R>>,
    pub enable_sorting: Option<bool>,
    pub enable_column_filter: Option<bool>,
    pub enable_hiding: Option<bool>,
}

impl<R> ColumnDef<R> {
    /// A column reading `key` from the record; its id is the key.
    pub fn accessor(key: &'static str) -> Self {
        Self {
            id: key.to_string(),
            accessor_key: Some(key),
            header: Header::Empty,
            cell: None,
            enable_sorting: None,
            enable_column_filter: None,
            enable_hiding: None,
        }
    }

    /// A presentational column with no backing field.
    pub fn display(id: &str) -> Self {
        Self {
            id: id.to_string(),
            accessor_key: None,
            header: Header::Empty,
            cell: None,
            enable_sorting: None,
            enable_column_filter: None,
            enable_hiding: None,
        }
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    pub fn cell<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellContext<'_, R>) -> Render + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(f));
        self
    }

    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = Some(enabled);
        self
    }

    pub fn enable_column_filter(mut self, enabled: bool) -> Self {
        self.enable_column_filter = Some(enabled);
        self
    }

    pub fn enable_hiding(mut self, enabled: bool) -> Self {
        self.enable_hiding = Some(enabled);
        self
    }

    pub(crate) fn render_cell(&self, ctx: &CellContext<'_, R>) -> Render {
        match &self.cell {
            Some(f) => f(ctx),
            None => Render::text(ctx.value.clone().unwrap_or_default()),
        }
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            accessor_key: self.accessor_key,
            header: self.header.clone(),
            cell: self.cell.clone(),
            enable_sorting: self.enable_sorting,
            enable_column_filter: self.enable_column_filter,
            enable_hiding: self.enable_hiding,
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("accessor_key", &self.accessor_key)
            .field("header", &self.header)
            .field("cell", &self.cell.as_ref().map(|_| ".."))
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_column_filter", &self.enable_column_filter)
            .field("enable_hiding", &self.enable_hiding)
            .finish()
    }
}
