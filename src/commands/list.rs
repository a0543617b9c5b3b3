//! Implementation of the `promptbatch list` command.

use crate::context::require_initialized_library;
use crate::error::Result;
use crate::store::{FsLibrary, TemplateSource};

/// Execute the `promptbatch list` command.
pub fn cmd_list() -> Result<()> {
    let ctx = require_initialized_library()?;
    let library = FsLibrary::new(ctx);

    let ids = library.template_ids()?;
    if ids.is_empty() {
        println!("No templates in the library.");
        return Ok(());
    }

    println!("Templates ({}):", ids.len());
    for id in &ids {
        match library.get_template(id) {
            Ok(template) => {
                let description = template.description.as_deref().unwrap_or("");
                println!(
                    "  {:<24} {} variable(s)  {}",
                    id,
                    template.variables.len(),
                    description
                );
            }
            // An unreadable file should not hide the rest of the library.
            Err(err) => println!("  {:<24} (unreadable: {})", id, err),
        }
    }

    Ok(())
}
