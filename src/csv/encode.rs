//! CSV skeleton encoding.
//!
//! Turns a template into a fill-in CSV document: a header row listing the
//! declared variable names in declaration order, followed by exactly one
//! blank data row. Users duplicate the blank row per prompt they want to
//! run and feed the file back to the batch command.

use super::write_row;
use crate::error::{PromptError, Result};
use crate::template::Template;

/// Encode a template into a fill-in CSV skeleton.
///
/// # Errors
///
/// Returns `PromptError::UserError` when the template declares no variables;
/// there is nothing to fill in for such a template.
pub fn encode_skeleton(template: &Template) -> Result<String> {
    if template.variables.is_empty() {
        return Err(PromptError::UserError(format!(
            "template '{}' declares no variables",
            template.id
        )));
    }

    let header: Vec<String> = template.variable_names().map(String::from).collect();
    let blank_row = vec![String::new(); header.len()];

    Ok(format!(
        "{}\n{}\n",
        write_row(&header),
        write_row(&blank_row)
    ))
}
