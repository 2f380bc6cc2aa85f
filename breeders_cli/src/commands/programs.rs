use anyhow::{bail, Result};
use clap::Args;
use breeders_lib::programs::columns;
use breeders_lib::table::SortDirection;
use breeders_lib::types::Program;
use breeders_lib::validation::{self, Selection};
use breeders_lib::{load_program, load_programs, Client, DataTable, LoadState, PagedQuery, ProgramQuery, Query, QueryParams};
use url::Url;

use crate::output::{print_csv, print_json, print_markdown, print_table, OutputFormat};

/// Location of the programs page whose query string drives the request.
const PAGE_URL: &str = "http://localhost/sv/breeders";

#[derive(Args)]
pub struct ProgramsArgs {
    /// Get a single program by its programDbId
    #[arg(long)]
    pub id: Option<String>,

    /// Filter by program name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by abbreviation
    #[arg(long)]
    pub abbreviation: Option<String>,

    /// Filter by program type: standard, project
    #[arg(long)]
    pub program_type: Option<String>,

    /// Filter by common crop name (e.g. Wheat)
    #[arg(long)]
    pub crop: Option<String>,

    /// Extra query parameter sent verbatim, as name=value (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Page number (0-indexed)
    #[arg(long)]
    pub page: Option<u64>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Sort the loaded page by a column id (programDbId, programName, objective, abbreviation)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction: asc, desc
    #[arg(long, default_value = "asc")]
    pub sort_dir: String,

    /// Keep rows whose column contains the text, as column=text (repeatable)
    #[arg(long = "filter", value_name = "COLUMN=TEXT")]
    pub filters: Vec<String>,

    /// Hide a column by id (repeatable)
    #[arg(long = "hide", value_name = "COLUMN")]
    pub hidden: Vec<String>,

    /// Mark rows as selected: all, or positions in the displayed (sorted,
    /// filtered) order such as 0,2
    #[arg(long)]
    pub select: Option<String>,
}

/// Builds the page URL a browser would be on for these arguments.
fn page_url(args: &ProgramsArgs) -> Result<Url> {
    let mut query = ProgramQuery::default();

    if let Some(name) = &args.name {
        query = query.with_program_name(&validation::validate_search(name)?);
    }
    if let Some(abbreviation) = &args.abbreviation {
        query = query.with_abbreviation(&validation::validate_search(abbreviation)?);
    }
    if let Some(program_type) = &args.program_type {
        query = query.with_program_type(validation::validate_program_type(program_type)?);
    }
    if let Some(crop) = &args.crop {
        query = query.with_common_crop_name(&validation::validate_search(crop)?);
    }
    if let Some(page) = args.page {
        query = query.with_page(page);
    }
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            bail!("page size must be at least 1");
        }
        query = query.with_page_size(page_size);
    }

    let raw = args
        .params
        .iter()
        .map(|p| validation::parse_param(p))
        .collect::<Result<QueryParams, _>>()?;

    let base = Url::parse(PAGE_URL)?;
    Ok(raw.add_to_url(&query.add_to_url(&base)))
}

/// Applies sort, filter, visibility and selection flags to the table.
fn apply_table_args(table: &mut DataTable<Program>, args: &ProgramsArgs) -> Result<()> {
    if let Some(column) = &args.sort_by {
        let direction = validation::validate_sort_direction(&args.sort_dir)?;
        table.set_sorting(column, direction)?;
    } else if validation::validate_sort_direction(&args.sort_dir)? == SortDirection::Desc {
        bail!("--sort-dir requires --sort-by");
    }

    for filter in args.filters.iter() {
        let (column, needle) = validation::parse_param(filter)?;
        table.set_filter(&column, &needle)?;
    }

    for column in args.hidden.iter() {
        table.set_column_visibility(column, false)?;
    }

    if let Some(select) = &args.select {
        match validation::parse_selection(select)? {
            Selection::All => table.toggle_all_page_rows_selected(true),
            Selection::Rows(positions) => {
                let shown = table.page_rows();
                for position in positions {
                    let Some(&row) = shown.get(position) else {
                        bail!(
                            "row position {} is out of range ({} rows shown)",
                            position,
                            shown.len()
                        );
                    };
                    table.toggle_row_selected(row, true)?;
                }
            }
        }
    }
    Ok(())
}

fn render(table: &DataTable<Program>, format: &OutputFormat) -> Result<()> {
    let rendered = table.render();
    match format {
        OutputFormat::Table => print_table(&rendered),
        OutputFormat::Markdown => print_markdown(&rendered),
        OutputFormat::Csv => print_csv(&rendered)?,
        OutputFormat::Json => {
            let records: Vec<&Program> = rendered
                .rows
                .iter()
                .map(|row| &table.rows()[row.index])
                .collect();
            print_json(&records);
        }
    }
    Ok(())
}

pub async fn run(args: &ProgramsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let url = page_url(args)?;

    if let Some(id) = &args.id {
        let mut page = load_program(client, &url, id);
        if let LoadState::Pending = page.promise.poll_state() {
            eprintln!("Loading program {}...", id);
        }
        let program = match page.promise.wait().await {
            Ok(program) => program,
            Err(e) if e.is_not_found() => bail!("404 Not Found: no program with id '{}'", id),
            Err(e) => return Err(e.into()),
        };
        let mut table = DataTable::new(columns(), vec![program])?;
        apply_table_args(&mut table, args)?;
        return render(&table, format);
    }

    let mut page = load_programs(client, &url);
    if let LoadState::Pending = page.promise.poll_state() {
        eprintln!("Loading programs...");
    }
    let resp = page.promise.wait().await?;

    eprintln!(
        "Page {}/{} ({} total programs, {} per page)",
        resp.pagination.current_page,
        resp.pagination.total_pages,
        resp.pagination.total_count,
        resp.pagination.page_size
    );

    let mut table = DataTable::new(columns(), resp.data)?;
    apply_table_args(&mut table, args)?;
    render(&table, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProgramsArgs {
        ProgramsArgs {
            id: None,
            name: None,
            abbreviation: None,
            program_type: None,
            crop: None,
            params: Vec::new(),
            page: None,
            page_size: None,
            sort_by: None,
            sort_dir: "asc".to_string(),
            filters: Vec::new(),
            hidden: Vec::new(),
            select: None,
        }
    }

    fn programs_table() -> DataTable<Program> {
        use breeders_lib::brapi_api::Schema;

        let programs = ["Alpha", "Bravo", "Charlie"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Program::validate(&serde_json::json!({
                    "programDbId": (i + 1).to_string(),
                    "programName": name,
                    "objective": null
                }))
                .unwrap()
            })
            .collect();
        DataTable::new(columns(), programs).unwrap()
    }

    fn selected_names(table: &DataTable<Program>) -> Vec<&str> {
        table
            .selected_rows()
            .into_iter()
            .map(|p| p.program_name.as_str())
            .collect()
    }

    #[test]
    fn select_uses_displayed_positions() {
        let mut table = programs_table();
        let mut a = args();
        a.sort_by = Some("programName".to_string());
        a.sort_dir = "desc".to_string();
        a.select = Some("0".to_string());
        apply_table_args(&mut table, &a).unwrap();
        assert_eq!(selected_names(&table), vec!["Charlie"]);
    }

    #[test]
    fn select_positions_follow_filter() {
        let mut table = programs_table();
        let mut a = args();
        a.filters = vec!["programName=br".to_string()];
        a.select = Some("0".to_string());
        apply_table_args(&mut table, &a).unwrap();
        assert_eq!(selected_names(&table), vec!["Bravo"]);

        let mut table = programs_table();
        a.select = Some("1".to_string());
        assert!(apply_table_args(&mut table, &a).is_err());
    }

    #[test]
    fn page_url_without_flags_has_no_query() {
        assert_eq!(page_url(&args()).unwrap().as_str(), PAGE_URL);
    }

    #[test]
    fn page_url_carries_filters_then_raw_params() {
        let mut a = args();
        a.name = Some(" Maize ".to_string());
        a.program_type = Some("project".to_string());
        a.page_size = Some(1_000_000);
        a.params = vec!["externalReferenceId=abc".to_string()];
        let url = page_url(&a).unwrap();
        assert_eq!(
            url.query(),
            Some("programName=Maize&programType=PROJECT&pageSize=1000000&externalReferenceId=abc")
        );
    }

    #[test]
    fn page_url_rejects_zero_page_size() {
        let mut a = args();
        a.page_size = Some(0);
        assert!(page_url(&a).is_err());
    }

    #[test]
    fn page_url_rejects_bad_param() {
        let mut a = args();
        a.params = vec!["nameonly".to_string()];
        assert!(page_url(&a).is_err());
    }
}
