//! Implementation of the `promptbatch vars` command.

use super::load_template;
use crate::cli::VarsArgs;
use crate::context::require_initialized_library;
use crate::error::Result;
use crate::store::FsLibrary;

/// Execute the `promptbatch vars` command.
pub fn cmd_vars(args: VarsArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let library = FsLibrary::new(ctx);
    let template = load_template(&library, &args.template)?;

    if template.variables.is_empty() {
        println!("Template '{}' declares no variables.", template.id);
        return Ok(());
    }

    println!("Variables of '{}':", template.id);
    for var in &template.variables {
        match &var.default {
            Some(default) => println!("  {} (default: {})", var.name, default),
            None => println!("  {} (required)", var.name),
        }
    }

    Ok(())
}
