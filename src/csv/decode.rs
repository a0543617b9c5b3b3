//! CSV decoding into variable sets.
//!
//! The first non-empty line is the header; each later line becomes one
//! [`VariableSet`] keyed by the header tokens at matching column positions.
//! Ragged rows are tolerated: a row maps columns positionally up to
//! `min(header length, row length)` and missing columns are simply absent
//! from the set. Decoding fails only when the input has no rows at all or
//! the header row is empty.
//!
//! Fields are split on raw commas and trimmed. This intentionally does not
//! honor quoted commas on input; collection CSVs are authored from the
//! skeleton this tool emits, where values are plain fill-ins.

use crate::error::{PromptError, Result};
use crate::varset::VariableSet;

/// Decode CSV text into an ordered list of variable sets.
///
/// # Errors
///
/// - `PromptError::CsvError` when the input contains no non-empty lines
/// - `PromptError::CsvError` when the header row has no non-empty tokens
pub fn decode(csv_text: &str) -> Result<Vec<VariableSet>> {
    let lines: Vec<&str> = csv_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(PromptError::CsvError("input contains no rows".to_string()));
    };

    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();
    if header.iter().all(|name| name.is_empty()) {
        return Err(PromptError::CsvError("header row is empty".to_string()));
    }

    let sets = data_lines
        .iter()
        .map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let mut set = VariableSet::new();
            for (name, value) in header.iter().zip(&fields) {
                // Columns without a header name carry no variable.
                if !name.is_empty() {
                    set.insert(*name, *value);
                }
            }
            set
        })
        .collect();

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_document() {
        let sets = decode("name,age\nJohn,30\nJane,25").unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].get("name"), Some("John"));
        assert_eq!(sets[0].get("age"), Some("30"));
        assert_eq!(sets[1].get("name"), Some("Jane"));
        assert_eq!(sets[1].get("age"), Some("25"));
    }

    #[test]
    fn trims_fields_and_header_tokens() {
        let sets = decode(" name , age \n John , 30 ").unwrap();
        assert_eq!(sets[0].get("name"), Some("John"));
        assert_eq!(sets[0].get("age"), Some("30"));
    }

    #[test]
    fn drops_empty_lines() {
        let sets = decode("name,age\n\nJohn,30\n   \nJane,25\n\n").unwrap();
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn ragged_rows_do_not_raise() {
        let sets = decode("a,b\n1,2,3\n4").unwrap();

        assert_eq!(sets.len(), 2);
        // Extra column is discarded.
        assert_eq!(sets[0].get("a"), Some("1"));
        assert_eq!(sets[0].get("b"), Some("2"));
        // Missing column is absent, not fabricated.
        assert_eq!(sets[1].get("a"), Some("4"));
        assert_eq!(sets[1].get("b"), None);
        assert!(!sets[1].contains("b"));
    }

    #[test]
    fn header_only_yields_no_sets() {
        let sets = decode("name,age\n").unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn blank_data_row_yields_empty_values() {
        let sets = decode("name,age\n,").unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].get("name"), Some(""));
        assert_eq!(sets[0].get("age"), Some(""));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = decode("").unwrap_err();
        assert!(err.to_string().contains("no rows"));

        let err = decode("\n\n  \n").unwrap_err();
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn empty_header_is_an_error() {
        let err = decode(",,\nJohn,30").unwrap_err();
        assert!(err.to_string().contains("header row is empty"));
    }

    #[test]
    fn unnamed_columns_are_skipped() {
        let sets = decode("name,,age\nJohn,ignored,30").unwrap();

        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[0].get("name"), Some("John"));
        assert_eq!(sets[0].get("age"), Some("30"));
    }

    #[test]
    fn crlf_rows_decode() {
        let sets = decode("name,age\r\nJohn,30\r\n").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].get("age"), Some("30"));
    }
}
