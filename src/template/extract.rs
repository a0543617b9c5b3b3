//! Placeholder extraction.
//!
//! Scans template text for `{{name}}` tokens and reports the distinct
//! variable names referenced, in order of first occurrence. Extraction never
//! fails: malformed tokens (empty names, unmatched braces) are skipped, not
//! errors, so arbitrary text is always safe to scan.

use super::PLACEHOLDER_REGEX;

/// Extract the distinct variable names referenced by a template body.
///
/// Whitespace inside the braces is trimmed, so `{{ name }}` and `{{name}}`
/// reference the same variable. Names are compared case-sensitively.
///
/// # Examples
///
/// ```no_run
/// use promptbatch::template::extract_variables;
///
/// let names = extract_variables("Hello {{name}}, you are {{ age }}. Bye {{name}}!");
/// assert_eq!(names, vec!["name", "age"]);
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = caps[1].trim();
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}
