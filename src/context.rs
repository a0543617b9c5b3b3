//! Library context resolution for promptbatch.
//!
//! Finds the prompt library state directory (`.promptbatch/`) by walking up
//! from the current working directory, the same way version-control tools
//! locate their repository root. All commands use this module to locate
//! library state, so invocations from any subdirectory of a project target
//! the same library.
//!
//! # Layout
//!
//! ```text
//! {root}/.promptbatch/
//!   config.yaml            tool configuration
//!   templates/             one .md file per template
//!   collections/           one file per imported variable collection
//!   history/history.ndjson append-only execution history
//! ```

use crate::error::{PromptError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the library state directory.
pub const STATE_DIR_NAME: &str = ".promptbatch";

/// File name of the execution history log.
pub const HISTORY_FILE_NAME: &str = "history.ndjson";

/// Resolved paths for a prompt library.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct LibraryContext {
    /// Directory containing the state directory.
    pub root: PathBuf,

    /// Absolute path to the state directory (`{root}/.promptbatch/`).
    pub state_dir: PathBuf,
}

impl LibraryContext {
    /// Resolve the library context from the current working directory.
    ///
    /// Walks up the directory tree looking for an existing `.promptbatch/`
    /// directory. When none is found, the context anchors at the working
    /// directory itself so that `init` can create a fresh library there.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            PromptError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd))
    }

    /// Resolve the library context from a specific directory.
    ///
    /// This is useful for testing or when the working directory is known.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref();

        let mut dir = Some(cwd);
        while let Some(candidate) = dir {
            if candidate.join(STATE_DIR_NAME).is_dir() {
                return Self::at_root(candidate);
            }
            dir = candidate.parent();
        }

        Self::at_root(cwd)
    }

    /// Build a context anchored at an explicit root directory.
    pub fn at_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let state_dir = root.join(STATE_DIR_NAME);
        Self { root, state_dir }
    }

    /// Whether the library has been initialized.
    pub fn library_exists(&self) -> bool {
        self.state_dir.is_dir()
    }

    /// Path to the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.state_dir.join("config.yaml")
    }

    /// Directory holding template files.
    pub fn templates_dir(&self) -> PathBuf {
        self.state_dir.join("templates")
    }

    /// Directory holding imported variable collections.
    pub fn collections_dir(&self) -> PathBuf {
        self.state_dir.join("collections")
    }

    /// Directory holding the execution history log.
    pub fn history_dir(&self) -> PathBuf {
        self.state_dir.join("history")
    }

    /// Path to a template file by library id.
    pub fn template_path(&self, id: &str) -> PathBuf {
        self.templates_dir().join(format!("{}.md", id))
    }

    /// Path to a collection file by library id.
    pub fn collection_path(&self, id: &str) -> PathBuf {
        self.collections_dir().join(format!("{}.md", id))
    }

    /// Path to the execution history log.
    pub fn history_file(&self) -> PathBuf {
        self.history_dir().join(HISTORY_FILE_NAME)
    }
}

/// Resolve the context and require an initialized library.
///
/// All commands except `init` go through this guard so users get a
/// consistent, actionable message instead of scattered file-not-found
/// errors.
pub fn require_initialized_library() -> Result<LibraryContext> {
    let ctx = LibraryContext::resolve()?;
    if !ctx.library_exists() {
        return Err(PromptError::UserError(
            "no prompt library found; run 'promptbatch init' first".to_string(),
        ));
    }
    Ok(ctx)
}
