//! Atomic file writes.
//!
//! All state-mutating writes follow the same pattern:
//!
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Atomically replace the target file
//!
//! On POSIX, `rename()` is atomic when source and destination share a
//! filesystem. On Windows, a plain rename is attempted first and an existing
//! target is removed before retrying. A crash can leave a `.{name}.tmp` file
//! behind in the target directory.

use crate::error::{PromptError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PromptError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    atomic_replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around [`atomic_write`] for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path in the same directory as the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PromptError::UserError("invalid file path".to_string()))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync it to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        PromptError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            PromptError::UserError(format!("failed to write temporary file: {}", e))
        })?;

    Ok(())
}

#[cfg(unix)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    // rename() replaces the destination atomically on the same filesystem.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        PromptError::UserError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Sync the parent directory so the new entry is durable.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(windows)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    // Windows rename fails when the target exists; remove it first and retry.
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(_) if target.exists() => fs::remove_file(target)
            .and_then(|()| fs::rename(source, target))
            .map_err(|e| {
                let _ = fs::remove_file(source);
                PromptError::UserError(format!(
                    "failed to replace '{}': {}",
                    target.display(),
                    e
                ))
            }),
        Err(e) => {
            let _ = fs::remove_file(source);
            Err(PromptError::UserError(format!(
                "failed to replace '{}': {}",
                target.display(),
                e
            )))
        }
    }
}
