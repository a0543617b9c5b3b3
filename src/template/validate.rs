//! Variable set validation against a template's declarations.
//!
//! A set is valid for a template iff every declared variable with no default
//! value is present with a non-empty value. Declared variables that carry a
//! default are exempt (the default substitutes on resolution), and extra
//! keys in the set are permitted and ignored. Validation is pure; neither
//! input is mutated.

use super::Template;
use crate::varset::VariableSet;

/// Outcome of validating one variable set against a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    missing: Vec<String>,
}

impl ValidationReport {
    /// Whether the set satisfied every required variable.
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// Names of required variables that were absent or empty,
    /// in declaration order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// A descriptive error message, or `None` when the report is valid.
    pub fn error_message(&self) -> Option<String> {
        if self.missing.is_empty() {
            None
        } else {
            Some(format!(
                "missing required variable(s): {}",
                self.missing.join(", ")
            ))
        }
    }
}

/// Validate a variable set against a template's declared variables.
///
/// An empty-string value counts the same as an absent one: both fail a
/// required variable and both trigger default substitution for a defaulted
/// variable.
pub fn validate_set(template: &Template, set: &VariableSet) -> ValidationReport {
    let missing = template
        .variables
        .iter()
        .filter(|var| var.default.is_none())
        .filter(|var| !set.get(&var.name).is_some_and(|v| !v.is_empty()))
        .map(|var| var.name.clone())
        .collect();

    ValidationReport { missing }
}
