//! Validation of user-supplied filter and table-control input.

use brapi_api::types::ProgramType;

use crate::error::BreedersError;
use crate::table::SortDirection;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_PARAM_NAME_LENGTH: usize = 64;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, BreedersError> {
    if input.len() > max_len {
        return Err(BreedersError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(BreedersError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search/name string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, BreedersError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a program type: case-insensitive `standard` or `project`.
pub fn validate_program_type(input: &str) -> Result<ProgramType, BreedersError> {
    match input.trim().to_lowercase().as_str() {
        "standard" => Ok(ProgramType::Standard),
        "project" => Ok(ProgramType::Project),
        _ => Err(BreedersError::InvalidInput(format!(
            "unknown program type '{}'. Valid values: standard, project",
            input
        ))),
    }
}

/// Parse a raw `name=value` query parameter. The value may be empty and may
/// itself contain `=`; the name may not be empty.
pub fn parse_param(input: &str) -> Result<(String, String), BreedersError> {
    let (name, value) = input.split_once('=').ok_or_else(|| {
        BreedersError::InvalidInput(format!("expected name=value, got '{}'", input))
    })?;
    let name = name.trim();
    if name.is_empty() || name.len() > MAX_PARAM_NAME_LENGTH {
        return Err(BreedersError::InvalidInput(format!(
            "parameter name must be 1-{} bytes, got '{}'",
            MAX_PARAM_NAME_LENGTH, name
        )));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a sort direction: `asc` or `desc`, case-insensitive.
pub fn validate_sort_direction(input: &str) -> Result<SortDirection, BreedersError> {
    match input.trim().to_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        _ => Err(BreedersError::InvalidInput(format!(
            "unknown sort direction '{}'. Valid values: asc, desc",
            input
        ))),
    }
}

/// Row selection requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every row on the page.
    All,
    /// Specific 0-based row positions.
    Rows(Vec<usize>),
}

/// Parse `all` or a comma-separated list of row positions (e.g. `0,2,5`).
pub fn parse_selection(input: &str) -> Result<Selection, BreedersError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }
    let rows = trimmed
        .split(',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| {
                BreedersError::InvalidInput(format!(
                    "invalid row position '{}'. Use 'all' or e.g. 0,2,5",
                    part.trim()
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Selection::Rows(rows))
}
