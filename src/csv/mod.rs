//! CSV codec for variable collections and batch results.
//!
//! Three independent operations, none of which touch storage:
//!
//! - [`encode_skeleton`]: template -> fill-in CSV (header + one blank row)
//! - [`decode`]: CSV text -> ordered list of variable sets
//! - [`export_results`]: batch results -> results CSV
//!
//! # Format
//!
//! UTF-8, comma-delimited, newline-separated rows. Output follows RFC 4180
//! quoting: fields containing commas, quotes, or newlines are wrapped in
//! double quotes with internal quotes doubled. Decoding is deliberately
//! permissive: fields are split on raw commas and trimmed, empty lines are
//! dropped, and ragged rows are mapped positionally rather than rejected.
//! The only fatal conditions are an input with zero rows and an empty
//! header row.

pub mod decode;
pub mod encode;
pub mod export;

pub use decode::decode;
pub use encode::encode_skeleton;
pub use export::export_results;

/// Quote a field for CSV output when it needs quoting.
///
/// Fields containing a comma, double quote, or newline are wrapped in double
/// quotes with internal quotes doubled; everything else passes through
/// unchanged.
pub(crate) fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join fields into one CSV row, quoting as needed.
pub(crate) fn write_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}
