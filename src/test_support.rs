use crate::config::Config;
use crate::context::LibraryContext;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a temp directory holding an initialized prompt library.
pub(crate) fn create_test_library() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let ctx = LibraryContext::at_root(temp_dir.path());

    for dir in [
        ctx.templates_dir(),
        ctx.collections_dir(),
        ctx.history_dir(),
    ] {
        std::fs::create_dir_all(dir).unwrap();
    }
    Config::default().save(ctx.config_path()).unwrap();

    temp_dir
}
