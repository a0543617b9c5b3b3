//! CSV export of batch execution results.
//!
//! Produces one document per batch run with a fixed column layout:
//!
//! ```text
//! Set_Index,Success,Error,<variable names...>,Resolved_Prompt
//! ```
//!
//! One row per result in original batch order, with a 1-based set index.
//! Variable columns follow the template's declaration order; a value absent
//! from a result's set exports as an empty field. Failed rows export an
//! empty resolved prompt and their error message; successful rows export an
//! empty error field.

use super::write_row;
use crate::batch::ExecutionResult;
use crate::template::Template;

/// Fixed leading columns of the results document.
const LEADING_COLUMNS: &[&str] = &["Set_Index", "Success", "Error"];

/// Trailing column holding the resolved text.
const RESOLVED_COLUMN: &str = "Resolved_Prompt";

/// Export batch results as a CSV document.
pub fn export_results(template: &Template, results: &[ExecutionResult]) -> String {
    let mut header: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(template.variable_names().map(String::from));
    header.push(RESOLVED_COLUMN.to_string());

    let mut output = write_row(&header);
    output.push('\n');

    for (index, result) in results.iter().enumerate() {
        let mut fields: Vec<String> = vec![
            (index + 1).to_string(),
            result.success.to_string(),
            result.error.clone().unwrap_or_default(),
        ];
        fields.extend(
            template
                .variable_names()
                .map(|name| result.set.get(name).unwrap_or_default().to_string()),
        );
        fields.push(result.resolved.clone());

        output.push_str(&write_row(&fields));
        output.push('\n');
    }

    output
}
