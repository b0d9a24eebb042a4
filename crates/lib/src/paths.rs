use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_MODULES_DIR, HOOK_SCRIPT_DIR, HOOK_SCRIPT_FILE, MODULES_DIR_ENV};

/// Returns the modules root: `$BUILDHOOK_MODULES_DIR` if set and non-empty,
/// otherwise `./modules`.
pub fn modules_dir() -> PathBuf {
  std::env::var(MODULES_DIR_ENV)
    .ok()
    .filter(|dir| !dir.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULES_DIR))
}

/// Returns where a module keeps its hook script.
pub fn hook_script_path(module_dir: &Path) -> PathBuf {
  module_dir.join(HOOK_SCRIPT_DIR).join(HOOK_SCRIPT_FILE)
}
