//! Hook registry keyed by module name.
//!
//! Hooks are registered explicitly, either as native [`BuildHook`]
//! implementations or as Lua scripts, or discovered from a modules root where
//! each module keeps its script at `<module>/build_scripts/setup.lua`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::hook::BuildHook;
use crate::lua::LuaHook;
use crate::paths::hook_script_path;

/// Errors raised while populating a [`HookRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
  #[error("a hook is already registered for module '{0}'")]
  Duplicate(String),

  #[error("failed to load hook for module '{module}'")]
  Load {
    module: String,
    #[source]
    source: LoadError,
  },

  #[error("cannot scan modules directory '{}'", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Module name to hook mapping, ordered by module name.
#[derive(Default, Clone)]
pub struct HookRegistry {
  hooks: BTreeMap<String, Arc<dyn BuildHook>>,
}

impl fmt::Debug for HookRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HookRegistry")
      .field("modules", &self.hooks.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl HookRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `hook` for `module`.
  pub fn register(&mut self, module: impl Into<String>, hook: Arc<dyn BuildHook>) -> Result<(), RegistryError> {
    let module = module.into();
    if self.hooks.contains_key(&module) {
      return Err(RegistryError::Duplicate(module));
    }

    debug!(module = %module, "registered hook");
    self.hooks.insert(module, hook);
    Ok(())
  }

  /// Load the Lua script at `path` and register it for `module`.
  pub fn register_script(&mut self, module: impl Into<String>, path: impl AsRef<Path>) -> Result<(), RegistryError> {
    let module = module.into();
    if self.hooks.contains_key(&module) {
      return Err(RegistryError::Duplicate(module));
    }

    let hook = LuaHook::load(path).map_err(|source| RegistryError::Load {
      module: module.clone(),
      source,
    })?;
    self.register(module, Arc::new(hook))
  }

  /// Remove and return the hook registered for `module`.
  pub fn unregister(&mut self, module: &str) -> Option<Arc<dyn BuildHook>> {
    self.hooks.remove(module)
  }

  pub fn get(&self, module: &str) -> Option<Arc<dyn BuildHook>> {
    self.hooks.get(module).cloned()
  }

  pub fn contains(&self, module: &str) -> bool {
    self.hooks.contains_key(module)
  }

  /// Registered module names in sorted order.
  pub fn modules(&self) -> impl Iterator<Item = &str> {
    self.hooks.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.hooks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hooks.is_empty()
  }

  /// Build a registry from every module under `modules_root` that ships a
  /// hook script.
  pub fn discover(modules_root: &Path) -> Result<Self, RegistryError> {
    let mut registry = Self::new();
    for script in discover_scripts(modules_root)? {
      registry.register_script(script.module, &script.path)?;
    }

    info!(
      root = %modules_root.display(),
      count = registry.len(),
      "discovered module hooks"
    );
    Ok(registry)
  }
}

/// A hook script found under a modules root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredScript {
  pub module: String,
  pub path: PathBuf,
}

/// List `<module>/build_scripts/setup.lua` for each immediate subdirectory of
/// `modules_root`, sorted by module name. Modules without a script are skipped.
pub fn discover_scripts(modules_root: &Path) -> Result<Vec<DiscoveredScript>, RegistryError> {
  let io_err = |source: std::io::Error| RegistryError::Io {
    path: modules_root.to_path_buf(),
    source,
  };

  let mut scripts = Vec::new();
  for entry in fs::read_dir(modules_root).map_err(io_err)? {
    let entry = entry.map_err(io_err)?;
    if !entry.file_type().map_err(io_err)?.is_dir() {
      continue;
    }

    let Some(module) = entry.file_name().to_str().map(str::to_string) else {
      debug!(path = %entry.path().display(), "skipping module with non-UTF-8 name");
      continue;
    };

    let path = hook_script_path(&entry.path());
    if path.is_file() {
      scripts.push(DiscoveredScript { module, path });
    } else {
      debug!(module = %module, "module has no hook script");
    }
  }

  scripts.sort_by(|a, b| a.module.cmp(&b.module));
  Ok(scripts)
}
