//! CLI argument parsing for promptbatch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptbatch: file-based prompt template manager with batch CSV execution.
///
/// Templates are markdown files with `{{variable}}` placeholders stored in a
/// `.promptbatch/` library. Variables are supplied one set at a time with
/// `render`, or row by row from CSV documents with `batch`.
#[derive(Parser, Debug)]
#[command(name = "promptbatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse CLI arguments from the process environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for promptbatch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a prompt library in the current directory.
    ///
    /// Creates `.promptbatch/` with templates/, collections/ and a default
    /// config.yaml. Idempotent.
    Init,

    /// Add a template to the library.
    ///
    /// Reads the template body from --file or stdin, derives the declared
    /// variables from its placeholders, and writes the template file.
    Add(AddArgs),

    /// List templates in the library.
    List,

    /// Show the declared variables of a template.
    Vars(VarsArgs),

    /// Resolve a template against one set of variables.
    ///
    /// Validates the supplied values first; prints the resolved prompt.
    Render(RenderArgs),

    /// Emit a fill-in CSV skeleton for a template.
    ///
    /// The header lists the declared variables; one blank data row follows.
    Skeleton(SkeletonArgs),

    /// Import a CSV document as a named variable collection.
    ///
    /// Re-importing under the same id replaces the collection's content.
    Import(ImportArgs),

    /// Execute a template against every row of a CSV document or collection.
    ///
    /// Rows fail independently; the batch always runs to completion and
    /// reports the index and reason of each failed row.
    Batch(BatchArgs),

    /// Show recent execution history.
    History(HistoryArgs),
}

/// Arguments for the `add` command.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Template id (becomes the file stem under templates/).
    pub id: String,

    /// Read the template body from this file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Human-readable description stored in the template frontmatter.
    #[arg(long)]
    pub description: Option<String>,

    /// Default value for a variable, as NAME=DEFAULT. Repeatable.
    ///
    /// Names not referenced by the body are declared additionally.
    #[arg(long = "var", value_name = "NAME=DEFAULT")]
    pub vars: Vec<String>,

    /// Replace an existing template with the same id.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `vars` command.
#[derive(Parser, Debug)]
pub struct VarsArgs {
    /// Template id, or a path to a .md template file.
    pub template: String,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template id, or a path to a .md template file.
    pub template: String,

    /// Variable value, as NAME=VALUE. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub sets: Vec<String>,

    /// Do not record this execution in the history log.
    #[arg(long)]
    pub no_history: bool,
}

/// Arguments for the `skeleton` command.
#[derive(Parser, Debug)]
pub struct SkeletonArgs {
    /// Template id, or a path to a .md template file.
    pub template: String,

    /// Write the skeleton to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command.
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Collection id (becomes the file stem under collections/).
    pub id: String,

    /// Template id the collection supplies rows for.
    pub template: String,

    /// Path to the CSV document to import.
    pub csv: PathBuf,
}

/// Arguments for the `batch` command.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Template id, or a path to a .md template file.
    pub template: String,

    /// Run against the rows of this CSV file.
    #[arg(long, conflicts_with = "collection")]
    pub csv: Option<PathBuf>,

    /// Run against a collection imported earlier.
    #[arg(long)]
    pub collection: Option<String>,

    /// Write a results CSV to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not record successful executions in the history log.
    #[arg(long)]
    pub no_history: bool,
}

/// Arguments for the `history` command.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Number of records to show (default from config, normally 20).
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,
}
