//! Command implementations for promptbatch.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the small helpers shared between commands
//! (template reference resolution and `NAME=VALUE` parsing).

mod add;
mod batch_cmd;
mod history_cmd;
mod import;
mod init;
mod list;
mod render;
mod skeleton;
mod vars;

use crate::cli::Command;
use crate::error::{PromptError, Result};
use crate::store::{FsLibrary, TemplateSource};
use crate::template::Template;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::Add(args) => add::cmd_add(args),
        Command::List => list::cmd_list(),
        Command::Vars(args) => vars::cmd_vars(args),
        Command::Render(args) => render::cmd_render(args),
        Command::Skeleton(args) => skeleton::cmd_skeleton(args),
        Command::Import(args) => import::cmd_import(args),
        Command::Batch(args) => batch_cmd::cmd_batch(args),
        Command::History(args) => history_cmd::cmd_history(args),
    }
}

/// Resolve a template reference to a template.
///
/// A reference that names an existing `.md` file (or contains a path
/// separator) is loaded directly from disk; anything else is looked up in
/// the library by id.
pub(crate) fn load_template(library: &FsLibrary, reference: &str) -> Result<Template> {
    let path = Path::new(reference);
    let looks_like_path = path.extension().is_some_and(|ext| ext == "md")
        || reference.contains(std::path::MAIN_SEPARATOR);

    if looks_like_path {
        if !path.is_file() {
            return Err(PromptError::NotFound(format!(
                "template file '{}'",
                reference
            )));
        }
        return FsLibrary::template_from_path(path);
    }

    library.get_template(reference)
}

/// Parse one `NAME=VALUE` assignment.
pub(crate) fn parse_assignment(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(PromptError::UserError(format!(
            "invalid assignment '{}': expected NAME=VALUE",
            input
        ))),
    }
}
