//! Template and collection storage.
//!
//! The core resolution and batch logic never touches the filesystem; it
//! consumes these two narrow traits instead:
//!
//! - [`TemplateSource`]: supplies a template by id
//! - [`CollectionStore`]: persists and retrieves named variable collections
//!
//! [`FsLibrary`] implements both over a [`LibraryContext`]. Templates live
//! as frontmatter files under `templates/`; collections live under
//! `collections/` using the same frontmatter framing with the raw imported
//! CSV text as the body, so a collection survives byte-for-byte and can be
//! re-decoded on every read.

use crate::context::LibraryContext;
use crate::csv;
use crate::error::{PromptError, Result};
use crate::template::file::split_frontmatter;
use crate::template::{Template, TemplateFile};
use crate::varset::VariableCollection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Collaborator boundary supplying templates by id.
pub trait TemplateSource {
    /// Fetch a template by library id.
    ///
    /// Returns `PromptError::NotFound` when no such template exists; the
    /// core never invents a template.
    fn get_template(&self, id: &str) -> Result<Template>;
}

/// Collaborator boundary persisting named variable collections.
pub trait CollectionStore {
    /// Fetch a collection by id, decoding its rows.
    fn get_collection(&self, id: &str) -> Result<VariableCollection>;

    /// Persist a collection from raw CSV text, replacing any existing
    /// content under the same id. Returns the collection id.
    fn save_collection(&self, id: &str, template_id: &str, csv_text: &str) -> Result<String>;
}

/// Frontmatter of a stored collection file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CollectionFrontmatter {
    /// The template this collection supplies rows for.
    template: String,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Import timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,

    /// Unknown fields, preserved round-trip.
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

/// File-backed prompt library.
#[derive(Debug, Clone)]
pub struct FsLibrary {
    ctx: LibraryContext,
}

impl FsLibrary {
    /// Create a library over a resolved context.
    pub fn new(ctx: LibraryContext) -> Self {
        Self { ctx }
    }

    /// The underlying context.
    pub fn context(&self) -> &LibraryContext {
        &self.ctx
    }

    /// Atomically write a template file, replacing any existing one.
    pub fn save_template(&self, template: &Template) -> Result<()> {
        let file = TemplateFile::from_template(template);
        file.save(self.ctx.template_path(&template.id))
    }

    /// Whether a template with the given id exists.
    pub fn template_exists(&self, id: &str) -> bool {
        self.ctx.template_path(id).is_file()
    }

    /// Sorted ids of all templates in the library.
    pub fn template_ids(&self) -> Result<Vec<String>> {
        let dir = self.ctx.templates_dir();
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PromptError::UserError(format!(
                    "failed to read templates directory '{}': {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .filter_map(|path| file_stem(&path))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Load a template from an explicit file path outside the library.
    ///
    /// The file stem becomes the template id.
    pub fn template_from_path<P: AsRef<Path>>(path: P) -> Result<Template> {
        let path = path.as_ref();
        let id = file_stem(path)
            .ok_or_else(|| PromptError::UserError(format!("invalid template path '{}'", path.display())))?;
        TemplateFile::load(path)?.to_template(id)
    }
}

impl TemplateSource for FsLibrary {
    fn get_template(&self, id: &str) -> Result<Template> {
        let path = self.ctx.template_path(id);
        if !path.is_file() {
            return Err(PromptError::NotFound(format!("template '{}'", id)));
        }
        TemplateFile::load(&path)?.to_template(id)
    }
}

impl CollectionStore for FsLibrary {
    fn get_collection(&self, id: &str) -> Result<VariableCollection> {
        let path = self.ctx.collection_path(id);
        if !path.is_file() {
            return Err(PromptError::NotFound(format!("collection '{}'", id)));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read collection file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let normalized = content.replace("\r\n", "\n");
        let (yaml, body) = split_frontmatter(&normalized).ok_or_else(|| {
            PromptError::UserError(format!(
                "collection file '{}' is missing its frontmatter",
                path.display()
            ))
        })?;

        let frontmatter: CollectionFrontmatter = serde_yaml::from_str(&yaml).map_err(|e| {
            PromptError::UserError(format!(
                "failed to parse collection file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let sets = csv::decode(&body)?;

        Ok(VariableCollection {
            id: id.to_string(),
            template: frontmatter.template,
            description: frontmatter.description,
            sets,
        })
    }

    fn save_collection(&self, id: &str, template_id: &str, csv_text: &str) -> Result<String> {
        if !self.template_exists(template_id) {
            return Err(PromptError::NotFound(format!("template '{}'", template_id)));
        }

        // Reject structurally broken CSV before anything lands on disk.
        csv::decode(csv_text)?;

        let frontmatter = CollectionFrontmatter {
            template: template_id.to_string(),
            description: None,
            created: Some(Utc::now()),
            extra: BTreeMap::new(),
        };
        let yaml = serde_yaml::to_string(&frontmatter).map_err(|e| {
            PromptError::UserError(format!("failed to serialize collection frontmatter: {}", e))
        })?;

        let mut output = String::new();
        output.push_str("---\n");
        output.push_str(&yaml);
        output.push_str("---\n");
        output.push_str(csv_text);
        if !output.ends_with('\n') {
            output.push('\n');
        }

        crate::fs::atomic_write_file(self.ctx.collection_path(id), &output)?;
        Ok(id.to_string())
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
}
