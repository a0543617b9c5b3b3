//! Implementation of the `promptbatch init` command.
//!
//! Bootstraps the library state directory in the current working directory:
//!
//! 1. Creates `.promptbatch/` with `templates/`, `collections/`, `history/`
//! 2. Creates `config.yaml` with defaults (if missing)
//!
//! Running init inside an already-initialized library is a no-op.

use crate::config::Config;
use crate::context::LibraryContext;
use crate::error::{PromptError, Result};
use std::fs;

/// Execute the `promptbatch init` command.
///
/// This command is **idempotent**: running it multiple times will not error
/// and will not overwrite existing configuration.
pub fn cmd_init() -> Result<()> {
    let ctx = LibraryContext::resolve()?;
    create_library_structure(&ctx)?;

    println!("Initialized prompt library.");
    println!();
    println!("Library root: {}", ctx.state_dir.display());
    println!();
    println!("Created directories:");
    println!("  .promptbatch/templates/");
    println!("  .promptbatch/collections/");
    println!("  .promptbatch/history/");

    Ok(())
}

/// Create the state directories and default config.
pub(crate) fn create_library_structure(ctx: &LibraryContext) -> Result<()> {
    for dir in [
        ctx.templates_dir(),
        ctx.collections_dir(),
        ctx.history_dir(),
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            PromptError::UserError(format!(
                "failed to create directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let config_path = ctx.config_path();
    if !config_path.exists() {
        Config::default().save(&config_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn cmd_init_creates_library_in_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_init().unwrap();

        let ctx = LibraryContext::resolve().unwrap();
        assert!(ctx.library_exists());
        assert!(ctx.config_path().is_file());
    }

    #[test]
    fn creates_structure_and_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = LibraryContext::at_root(temp_dir.path());

        create_library_structure(&ctx).unwrap();

        assert!(ctx.templates_dir().is_dir());
        assert!(ctx.collections_dir().is_dir());
        assert!(ctx.history_dir().is_dir());
        assert!(ctx.config_path().is_file());
        assert!(ctx.library_exists());
    }

    #[test]
    fn init_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = LibraryContext::at_root(temp_dir.path());

        create_library_structure(&ctx).unwrap();

        // Customize the config, then re-init; the file must survive.
        let mut config = Config::default();
        config.history_limit = 5;
        config.save(ctx.config_path()).unwrap();

        create_library_structure(&ctx).unwrap();

        let loaded = Config::load(ctx.config_path()).unwrap();
        assert_eq!(loaded.history_limit, 5);
    }
}
