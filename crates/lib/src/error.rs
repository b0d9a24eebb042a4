//! Errors surfaced by hook invocation.

use std::path::PathBuf;

use mlua::prelude::*;

use crate::hook::BoxError;

/// Why a hook could not be located or loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("no hook is registered for this module")]
  NotRegistered,

  #[error("hook script not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("cannot read hook script '{}'", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot parse hook script")]
  Parse(#[source] LuaError),
}

/// Errors returned by the invoker.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
  /// The hook could not be located or failed to load.
  #[error("failed to load hook for module '{module}'")]
  Load {
    module: String,
    #[source]
    source: LoadError,
  },

  /// The hook raised while running. `source` is the hook's own error.
  #[error("hook for module '{module}' failed")]
  Runtime {
    module: String,
    #[source]
    source: BoxError,
  },
}

impl HookError {
  pub fn module(&self) -> &str {
    match self {
      HookError::Load { module, .. } | HookError::Runtime { module, .. } => module,
    }
  }

  pub fn is_load(&self) -> bool {
    matches!(self, HookError::Load { .. })
  }

  pub fn is_runtime(&self) -> bool {
    matches!(self, HookError::Runtime { .. })
  }
}

/// Render `err` and its sources as `outer: inner: ...`.
pub fn display_chain(err: &dyn std::error::Error) -> String {
  std::iter::successors(Some(err), |&e| e.source())
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(": ")
}
