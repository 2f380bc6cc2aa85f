use anyhow::Result;
use breeders_lib::table::{CheckState, Render, RenderedTable};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Self {
        match input {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

// -- Table builders --

fn build_table(rendered: &RenderedTable) -> Table {
    let mut builder = Builder::default();
    builder.push_record(rendered.headers.iter().map(Render::to_plain).collect::<Vec<_>>());
    for row in rendered.rows.iter() {
        builder.push_record(row.cells.iter().map(Render::to_plain).collect::<Vec<_>>());
    }
    builder.build()
}

/// CSV wants data, not widgets: checkboxes become booleans and action menus
/// their key.
fn csv_field(cell: &Render) -> String {
    match cell {
        Render::Checkbox { state, .. } => (*state == CheckState::Checked).to_string(),
        Render::Actions { name } => name.clone(),
        other => other.to_plain(),
    }
}

// -- Table output --

pub fn print_table(rendered: &RenderedTable) {
    println!("{}", build_table(rendered));
}

// -- Markdown output --

pub fn print_markdown(rendered: &RenderedTable) {
    let mut table = build_table(rendered);
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

fn write_csv<W: std::io::Write>(rendered: &RenderedTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&rendered.column_ids)?;
    for row in rendered.rows.iter() {
        wtr.write_record(row.cells.iter().map(csv_field))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_csv(rendered: &RenderedTable) -> Result<()> {
    write_csv(rendered, std::io::stdout())
}

// -- JSON output --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
