//! On-disk template format.
//!
//! Template files are markdown documents with YAML frontmatter delimited by
//! `---` lines; the body after the closing delimiter is the template text:
//!
//! ```text
//! ---
//! description: Greet a user
//! variables:
//!   - name: name
//!   - name: age
//!     default: "30"
//! ---
//! Hello {{name}}, you are {{age}}
//! ```
//!
//! Unknown frontmatter fields are preserved round-trip for forward
//! compatibility. A file without frontmatter is also accepted: the whole
//! content becomes the body and the declared variables are derived from the
//! placeholders it references.

use super::{extract_variables, Template, TemplateVariable};
use crate::error::{PromptError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed template file with frontmatter and body.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// The parsed frontmatter fields.
    pub frontmatter: TemplateFrontmatter,
    /// The template body (everything after the closing `---`).
    pub body: String,
}

/// Template frontmatter fields.
///
/// Known fields are explicitly typed; unknown fields are preserved in the
/// `extra` map for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFrontmatter {
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared variables in declaration order.
    ///
    /// When empty, the declarations are derived from the body's placeholders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<TemplateVariable>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Any fields not explicitly defined above.
    /// Using BTreeMap for deterministic serialization order.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl TemplateFile {
    /// Parse a template file from its content string.
    ///
    /// Both Unix (LF) and Windows (CRLF) line endings are accepted; the body
    /// is normalized to LF. Content that does not start with a `---` line is
    /// treated as a bare body with empty frontmatter.
    pub fn parse(content: &str) -> Result<Self> {
        let normalized = content.replace("\r\n", "\n");

        let Some((frontmatter_yaml, body)) = split_frontmatter(&normalized) else {
            return Ok(Self {
                frontmatter: TemplateFrontmatter::default(),
                body: normalized,
            });
        };

        let frontmatter: TemplateFrontmatter =
            serde_yaml::from_str(&frontmatter_yaml).map_err(|e| {
                PromptError::TemplateError(format!("failed to parse frontmatter: {}", e))
            })?;

        Ok(Self { frontmatter, body })
    }

    /// Load a template file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read template file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Atomically save the template file to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_string()?;
        crate::fs::atomic_write_file(path, &content)
    }

    /// Serialize the template file to a string.
    pub fn to_string(&self) -> Result<String> {
        let frontmatter_yaml = serde_yaml::to_string(&self.frontmatter).map_err(|e| {
            PromptError::TemplateError(format!("failed to serialize frontmatter: {}", e))
        })?;

        let mut output = String::new();
        output.push_str("---\n");
        output.push_str(&frontmatter_yaml);
        output.push_str("---\n");
        output.push_str(&self.body);

        Ok(output)
    }

    /// Convert into a [`Template`] with the given identifier.
    ///
    /// Frontmatter declarations win when present; otherwise every placeholder
    /// referenced by the body becomes a required variable.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::TemplateError` if the declared variables violate
    /// the uniqueness or non-empty invariants.
    pub fn to_template(&self, id: impl Into<String>) -> Result<Template> {
        let variables = if self.frontmatter.variables.is_empty() {
            extract_variables(&self.body)
                .into_iter()
                .map(TemplateVariable::required)
                .collect()
        } else {
            self.frontmatter.variables.clone()
        };

        let mut template = Template::with_variables(id, self.body.clone(), variables)?;
        template.description = self.frontmatter.description.clone();
        Ok(template)
    }

    /// Build a file representation from a template, stamping `created`.
    pub fn from_template(template: &Template) -> Self {
        Self {
            frontmatter: TemplateFrontmatter {
                description: template.description.clone(),
                variables: template.variables.clone(),
                created: Some(Utc::now()),
                extra: BTreeMap::new(),
            },
            body: template.body.clone(),
        }
    }
}

/// Split `---` delimited frontmatter from a document.
///
/// Returns `(yaml, body)` when the content starts with a frontmatter block,
/// `None` otherwise. Expects LF-normalized input. Shared with the collection
/// store, whose files use the same framing around a CSV body.
pub(crate) fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let rest = content.strip_prefix("---\n").or_else(|| {
        // A file that is nothing but an opening delimiter.
        (content == "---").then_some("")
    })?;

    match rest.find("\n---") {
        Some(closing) => {
            let yaml = rest[..closing].to_string();
            let after = &rest[closing + 4..];
            // Skip the newline that terminates the closing delimiter line.
            let body = after.strip_prefix('\n').unwrap_or(after).to_string();
            Some((yaml, body))
        }
        None => None,
    }
}
