use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use super::column::{CellContext, CheckState, ColumnDef, HeaderContext, Interaction, Render, SortDirection};
use super::Record;

/// Errors from declaring columns or driving table state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),
    #[error("column '{column}' reads unknown field '{field}'")]
    UnknownField { column: String, field: String },
    #[error("column '{0}' has no accessor and no cell renderer")]
    MissingCell(String),
    #[error("no column with id '{0}'")]
    UnknownColumn(String),
    #[error("sorting is disabled for column '{0}'")]
    SortingDisabled(String),
    #[error("filtering is disabled for column '{0}'")]
    FilteringDisabled(String),
    #[error("column '{0}' cannot be hidden")]
    HidingDisabled(String),
    #[error("row {row} is out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

/// Engine-wide defaults for columns that leave a capability flag unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub enable_sorting: bool,
    pub enable_column_filter: bool,
    pub enable_hiding: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_sorting: true,
            enable_column_filter: true,
            enable_hiding: true,
        }
    }
}

/// The active sort: one column at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSort {
    pub column: String,
    pub direction: SortDirection,
}

/// One rendered row, tagged with its position in the original row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub index: usize,
    pub cells: Vec<Render>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub column_ids: Vec<String>,
    pub headers: Vec<Render>,
    pub rows: Vec<RenderedRow>,
}

/// Validated rows plus the interaction state columns render against.
///
/// The "page" is the set of rows that pass the active filters; selection
/// shortcuts such as [`toggle_all_page_rows_selected`](Self::toggle_all_page_rows_selected)
/// only touch those rows.
#[derive(Debug)]
pub struct DataTable<R> {
    columns: Vec<ColumnDef<R>>,
    rows: Vec<R>,
    options: TableOptions,
    selected: Vec<bool>,
    sorting: Option<ColumnSort>,
    /// Column id and lowercase needle.
    filters: Vec<(String, String)>,
    hidden: HashSet<String>,
}

impl<R: Record> DataTable<R> {
    /// Builds a table after checking the column declarations against `R`.
    pub fn new(columns: Vec<ColumnDef<R>>, rows: Vec<R>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in columns.iter() {
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
            match column.accessor_key {
                Some(key) if !R::FIELDS.contains(&key) => {
                    return Err(TableError::UnknownField {
                        column: column.id.clone(),
                        field: key.to_string(),
                    });
                }
                None if column.cell.is_none() => {
                    return Err(TableError::MissingCell(column.id.clone()));
                }
                _ => {}
            }
        }

        let selected = vec![false; rows.len()];
        Ok(Self {
            columns,
            rows,
            options: TableOptions::default(),
            selected,
            sorting: None,
            filters: Vec::new(),
            hidden: HashSet::new(),
        })
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column(&self, id: &str) -> Result<&ColumnDef<R>, TableError> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    // -- Capabilities --

    /// Sorting needs a field to compare, so accessor-less columns never sort.
    pub fn can_sort(&self, column: &ColumnDef<R>) -> bool {
        column.accessor_key.is_some()
            && column.enable_sorting.unwrap_or(self.options.enable_sorting)
    }

    pub fn can_filter(&self, column: &ColumnDef<R>) -> bool {
        column.accessor_key.is_some()
            && column
                .enable_column_filter
                .unwrap_or(self.options.enable_column_filter)
    }

    pub fn can_hide(&self, column: &ColumnDef<R>) -> bool {
        column.enable_hiding.unwrap_or(self.options.enable_hiding)
    }

    // -- Selection --

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selected.get(row).copied().unwrap_or(false)
    }

    pub fn toggle_row_selected(&mut self, row: usize, value: bool) -> Result<(), TableError> {
        let len = self.selected.len();
        let slot = self
            .selected
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { row, len })?;
        *slot = value;
        Ok(())
    }

    /// Sets every row on the page to `value`.
    pub fn toggle_all_page_rows_selected(&mut self, value: bool) {
        for row in self.page_rows() {
            self.selected[row] = value;
        }
    }

    /// True when the page has rows and every one of them is selected.
    pub fn is_all_page_rows_selected(&self) -> bool {
        let page = self.page_rows();
        !page.is_empty() && page.iter().all(|&row| self.selected[row])
    }

    /// True when at least one, but not every, page row is selected.
    pub fn is_some_page_rows_selected(&self) -> bool {
        !self.is_all_page_rows_selected() && self.page_rows().iter().any(|&row| self.selected[row])
    }

    pub fn page_check_state(&self) -> CheckState {
        if self.is_all_page_rows_selected() {
            CheckState::Checked
        } else if self.is_some_page_rows_selected() {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(row, _)| row)
            .collect()
    }

    // -- Sorting --

    pub fn sorting(&self) -> Option<&ColumnSort> {
        self.sorting.as_ref()
    }

    pub fn set_sorting(&mut self, column: &str, direction: SortDirection) -> Result<(), TableError> {
        let def = self.column(column)?;
        if !self.can_sort(def) {
            return Err(TableError::SortingDisabled(column.to_string()));
        }
        self.sorting = Some(ColumnSort {
            column: column.to_string(),
            direction,
        });
        Ok(())
    }

    /// Cycles `column` through ascending, descending and unsorted. Sorting a
    /// different column replaces the current sort and starts ascending.
    pub fn toggle_sorting(&mut self, column: &str) -> Result<(), TableError> {
        let def = self.column(column)?;
        if !self.can_sort(def) {
            return Err(TableError::SortingDisabled(column.to_string()));
        }
        let next = match &self.sorting {
            Some(current) if current.column == column => match current.direction {
                SortDirection::Asc => Some(SortDirection::Desc),
                SortDirection::Desc => None,
            },
            _ => Some(SortDirection::Asc),
        };
        self.sorting = next.map(|direction| ColumnSort {
            column: column.to_string(),
            direction,
        });
        Ok(())
    }

    pub fn clear_sorting(&mut self) {
        self.sorting = None;
    }

    // -- Filtering --

    /// Keeps rows whose `column` value contains `needle`, ignoring case.
    /// An empty needle removes the filter.
    pub fn set_filter(&mut self, column: &str, needle: &str) -> Result<(), TableError> {
        let def = self.column(column)?;
        if !self.can_filter(def) {
            return Err(TableError::FilteringDisabled(column.to_string()));
        }
        self.filters.retain(|(id, _)| id != column);
        if !needle.is_empty() {
            self.filters
                .push((column.to_string(), needle.to_lowercase()));
        }
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // -- Visibility --

    pub fn set_column_visibility(&mut self, column: &str, visible: bool) -> Result<(), TableError> {
        let def = self.column(column)?;
        if visible {
            self.hidden.remove(column);
            return Ok(());
        }
        if !self.can_hide(def) {
            return Err(TableError::HidingDisabled(column.to_string()));
        }
        self.hidden.insert(column.to_string());
        Ok(())
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef<R>> {
        self.columns
            .iter()
            .filter(move |c| !self.hidden.contains(&c.id))
    }

    // -- Interactions --

    /// Applies the state change a rendered control describes.
    pub fn apply(&mut self, interaction: &Interaction) -> Result<(), TableError> {
        match interaction {
            Interaction::ToggleSorting { column } => self.toggle_sorting(column),
            Interaction::ToggleAllPageRows { value } => {
                self.toggle_all_page_rows_selected(*value);
                Ok(())
            }
            Interaction::ToggleRow { row, value } => self.toggle_row_selected(*row, *value),
        }
    }

    // -- Rendering --

    fn value(&self, row: usize, column: &ColumnDef<R>) -> Option<String> {
        column
            .accessor_key
            .and_then(|key| self.rows[row].field(key))
            .flatten()
    }

    /// Indices of rows that pass every filter, in display order.
    pub fn page_rows(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&row| {
                self.filters.iter().all(|(id, needle)| {
                    self.column(id).ok()
                        .and_then(|c| self.value(row, c))
                        .map(|v| v.to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false)
                })
            })
            .collect();

        if let Some(sort) = &self.sorting {
            if let Ok(column) = self.column(&sort.column) {
                indices.sort_by(|&a, &b| {
                    let ordering = compare_values(self.value(a, column), self.value(b, column));
                    match sort.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                });
            }
        }
        indices
    }

    pub fn render_header(&self, column: &ColumnDef<R>) -> Render {
        let all = self.is_all_page_rows_selected();
        let ctx = HeaderContext {
            column_id: &column.id,
            sorted: self
                .sorting
                .as_ref()
                .filter(|s| s.column == column.id)
                .map(|s| s.direction),
            can_sort: self.can_sort(column),
            all_page_rows_selected: all,
            some_page_rows_selected: !all && self.is_some_page_rows_selected(),
        };
        column.header.render(&ctx)
    }

    pub fn render_cell(&self, row: usize, column: &ColumnDef<R>) -> Render {
        let ctx = CellContext {
            row_index: row,
            original: &self.rows[row],
            value: self.value(row, column),
            selected: self.is_row_selected(row),
        };
        column.render_cell(&ctx)
    }

    /// Renders visible columns over the filtered, sorted page.
    pub fn render(&self) -> RenderedTable {
        let columns: Vec<&ColumnDef<R>> = self.visible_columns().collect();
        let rows = self
            .page_rows()
            .into_iter()
            .map(|row| RenderedRow {
                index: row,
                cells: columns.iter().map(|c| self.render_cell(row, c)).collect(),
            })
            .collect();
        RenderedTable {
            column_ids: columns.iter().map(|c| c.id.clone()).collect(),
            headers: columns.iter().map(|c| self.render_header(c)).collect(),
            rows,
        }
    }
}

/// Case-insensitive comparison; missing values sort after present ones.
fn compare_values(a: Option<String>, b: Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
