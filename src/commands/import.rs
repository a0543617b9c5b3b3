//! Implementation of the `promptbatch import` command.
//!
//! Saves a CSV document as a named variable collection. The CSV is decoded
//! first so structurally broken input (no rows, empty header) is rejected
//! before anything lands on disk. Re-importing an id replaces the
//! collection wholesale; collections have no partial-update path.

use crate::cli::ImportArgs;
use crate::context::require_initialized_library;
use crate::csv;
use crate::error::{PromptError, Result};
use crate::store::{CollectionStore, FsLibrary};

/// Execute the `promptbatch import` command.
pub fn cmd_import(args: ImportArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let library = FsLibrary::new(ctx);

    let csv_text = std::fs::read_to_string(&args.csv).map_err(|e| {
        PromptError::UserError(format!(
            "failed to read CSV file '{}': {}",
            args.csv.display(),
            e
        ))
    })?;

    let row_count = csv::decode(&csv_text)?.len();
    let id = library.save_collection(&args.id, &args.template, &csv_text)?;

    println!(
        "Imported collection '{}' ({} row(s)) for template '{}'.",
        id, row_count, args.template
    );

    Ok(())
}
