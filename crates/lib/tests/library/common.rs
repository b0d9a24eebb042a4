//! Shared helpers for library integration tests.

use std::path::{Path, PathBuf};

use buildhook_lib::BuildContext;
use buildhook_lib::paths::hook_script_path;
use tempfile::TempDir;

/// A temporary modules root with helpers to add modules.
pub struct ModulesRoot {
  pub temp: TempDir,
}

impl ModulesRoot {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Create `<root>/<module>/build_scripts/setup.lua` with `content`.
  pub fn add_module(&self, module: &str, content: &str) -> PathBuf {
    let path = hook_script_path(&self.path().join(module));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write an extra file inside a module's script directory.
  pub fn add_script_file(&self, module: &str, name: &str, content: &str) {
    let path = self.path().join(module).join("build_scripts").join(name);
    std::fs::write(path, content).unwrap();
  }

  /// Context for a module under this root.
  pub fn context(&self, module: &str) -> BuildContext {
    let root = self.path().to_string_lossy().to_string();
    BuildContext {
      generator: "Ninja".to_string(),
      build_config: "RelWithDebInfo".to_string(),
      module_url: String::new(),
      module_dir: format!("{}/{}", root, module),
      build_dir: format!("{}/build", root),
      deps_dir: format!("{}/deps", root),
      install_dir: format!("{}/install", root),
      root,
    }
  }
}
