//! Column declarations for the breeding programs table.

use brapi_api::types::Program;

use crate::table::{CheckState, ColumnDef, Header, Interaction, Record, Render};

impl Record for Program {
    const FIELDS: &'static [&'static str] = &[
        "programDbId",
        "programName",
        "abbreviation",
        "objective",
        "additionalInfo",
        "programType",
        "commonCropName",
    ];

    fn field(&self, key: &str) -> Option<Option<String>> {
        match key {
            "programDbId" => Some(Some(self.program_db_id.clone())),
            "programName" => Some(Some(self.program_name.clone())),
            "abbreviation" => Some(self.abbreviation.clone()),
            "objective" => Some(self.objective.clone()),
            "additionalInfo" => Some(self.description().map(str::to_string)),
            "programType" => Some(self.program_type.map(|t| t.to_string())),
            "commonCropName" => Some(self.common_crop_name.clone()),
            _ => None,
        }
    }
}

type Column = ColumnDef<Program>;

/// Columns of the programs table, left to right.
pub fn columns() -> Vec<Column> {
    vec![
        Column::display("select")
            .header(Header::custom(|ctx| Render::Checkbox {
                state: if ctx.all_page_rows_selected {
                    CheckState::Checked
                } else if ctx.some_page_rows_selected {
                    CheckState::Indeterminate
                } else {
                    CheckState::Unchecked
                },
                label: "Select all",
                on_change: Interaction::ToggleAllPageRows {
                    value: !ctx.all_page_rows_selected,
                },
            }))
            .cell(|ctx| Render::Checkbox {
                state: if ctx.selected {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                },
                label: "Select row",
                on_change: Interaction::ToggleRow {
                    row: ctx.row_index,
                    value: !ctx.selected,
                },
            })
            .enable_sorting(false)
            .enable_hiding(false),
        Column::accessor("programDbId")
            .header(Header::sortable("ID"))
            .enable_sorting(true)
            .enable_column_filter(true),
        Column::accessor("programName")
            .header(Header::sortable("Name"))
            .cell(|ctx| Render::Styled {
                class: "font-medium",
                text: ctx.original.program_name.clone(),
            })
            .enable_column_filter(true),
        Column::accessor("objective")
            .header(Header::sortable("Objective"))
            .cell(|ctx| Render::Styled {
                class: "text-left",
                text: ctx.original.objective.clone().unwrap_or_default(),
            })
            .enable_column_filter(true)
            .enable_sorting(true),
        Column::accessor("abbreviation")
            .header(Header::sortable("Abbreviation"))
            .enable_column_filter(true)
            .enable_sorting(true),
        Column::display("actions")
            .cell(|ctx| Render::Actions {
                name: ctx.original.program_name.clone(),
            })
            .enable_column_filter(false),
    ]
}
