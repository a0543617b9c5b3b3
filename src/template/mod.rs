//! Prompt template model for promptbatch.
//!
//! A template is a text body containing `{{variable}}` placeholders plus a
//! list of declared variables, each with an optional default value. The
//! submodules implement the pure operations over templates:
//!
//! - [`extract`]: scan a body for the placeholder names it references
//! - [`validate`]: check a variable set against the declared variables
//! - [`resolve`]: substitute values into the body
//! - [`file`]: the on-disk template format (YAML frontmatter + body)
//!
//! # Placeholder Syntax
//!
//! - `{{name}}` - A substitution point for variable `name`
//! - `{{ name }}` - Whitespace inside the braces is trimmed
//! - `{{}}` or unmatched braces - Malformed, ignored (left verbatim)
//!
//! Variable names are case-sensitive throughout.

pub mod extract;
pub mod file;
pub mod resolve;
pub mod validate;

pub use extract::extract_variables;
pub use file::TemplateFile;
pub use resolve::resolve;
pub use validate::{validate_set, ValidationReport};

use crate::error::{PromptError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Regex matching one `{{name}}` placeholder token.
///
/// The capture holds the raw inner text; callers trim it and skip empties.
/// Brace characters cannot appear inside a name, so nested or unmatched
/// braces simply fail to match and pass through as literal text.
pub(crate) static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("Invalid placeholder regex"));

/// One declared variable of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Variable name as it appears inside `{{...}}`.
    pub name: String,

    /// Default value substituted when a row omits this variable.
    ///
    /// A variable with a default is optional: validation does not require
    /// it, and resolution falls back to the default for absent or empty
    /// values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl TemplateVariable {
    /// Create a required variable (no default).
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Create an optional variable with a default value.
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// A prompt template: identifier, body text, and declared variables.
#[derive(Debug, Clone)]
pub struct Template {
    /// Template identifier (file stem in the library).
    pub id: String,

    /// Optional human-readable description.
    pub description: Option<String>,

    /// Declared variables in declaration order.
    ///
    /// Invariant: names are unique, case-sensitive, and non-empty.
    /// Enforced by the constructors.
    pub variables: Vec<TemplateVariable>,

    /// The template body containing `{{variable}}` placeholders.
    pub body: String,
}

impl Template {
    /// Create a template whose declared variables are derived from the body.
    ///
    /// Every placeholder referenced in the body becomes a required variable,
    /// in order of first occurrence.
    pub fn from_body(id: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let variables = extract_variables(&body)
            .into_iter()
            .map(TemplateVariable::required)
            .collect();
        Self {
            id: id.into(),
            description: None,
            variables,
            body,
        }
    }

    /// Create a template with an explicit variable declaration list.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::TemplateError` if any declared name is empty
    /// or duplicated (names are compared case-sensitively).
    pub fn with_variables(
        id: impl Into<String>,
        body: impl Into<String>,
        variables: Vec<TemplateVariable>,
    ) -> Result<Self> {
        validate_declarations(&variables)?;
        Ok(Self {
            id: id.into(),
            description: None,
            variables,
            body: body.into(),
        })
    }

    /// Declared variable names in declaration order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// Whether `name` is a declared variable of this template.
    pub fn is_declared(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name)
    }

    /// The configured default value for a declared variable, if any.
    pub fn default_for(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .and_then(|v| v.default.as_deref())
    }
}

/// Check the declared-variable invariant: unique, non-empty names.
fn validate_declarations(variables: &[TemplateVariable]) -> Result<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(variables.len());
    for var in variables {
        if var.name.trim().is_empty() {
            return Err(PromptError::TemplateError(
                "declared variable with empty name".to_string(),
            ));
        }
        if seen.contains(&var.name.as_str()) {
            return Err(PromptError::TemplateError(format!(
                "duplicate declared variable '{}'",
                var.name
            )));
        }
        seen.push(&var.name);
    }
    Ok(())
}
