use std::fs;
use std::path::{Path, PathBuf};

use mlua::prelude::*;
use tracing::debug;

use crate::context::{BuildContext, HookOutput};
use crate::error::LoadError;
use crate::hook::{BoxError, BuildHook};
use crate::lua::{globals, runtime};
use crate::paths::hook_script_path;

/// A hook backed by a Lua script.
///
/// The script is read and syntax-checked once by [`LuaHook::load`]. Every
/// [`BuildHook::extend`] call then runs it in a brand new VM, so globals set
/// by one invocation are never visible to the next.
///
/// After the chunk body runs, a returned function, or the `extend` field of a
/// returned table, is called with the read-only `ctx` userdata:
///
/// ```lua
/// return {
///   extend = function(ctx)
///     if ctx.build_config == "Debug" then
///       cmake_define("ENABLE_ASSERTS", true)
///     end
///   end,
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LuaHook {
  path: PathBuf,
  source: String,
}

impl LuaHook {
  /// Read and syntax-check the script at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
      return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let canonical_path = dunce::canonicalize(path).map_err(|source| LoadError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let source = fs::read_to_string(&canonical_path).map_err(|source| LoadError::Io {
      path: canonical_path.clone(),
      source,
    })?;

    Self::from_source(canonical_path, source)
  }

  /// Load the hook script of `module` under `modules_root`.
  pub fn load_module(modules_root: &Path, module: &str) -> Result<Self, LoadError> {
    Self::load(hook_script_path(&modules_root.join(module)))
  }

  /// Syntax-check `source` and attribute it to `path`.
  ///
  /// `path` is only used for chunk names in error messages and for the
  /// `require` search path; it does not have to exist.
  pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self, LoadError> {
    let hook = Self {
      path: path.into(),
      source: source.into(),
    };

    let lua = Lua::new();
    lua
      .load(&hook.source)
      .set_name(hook.chunk_name())
      .into_function()
      .map_err(LoadError::Parse)?;

    debug!(path = %hook.path.display(), "loaded hook script");
    Ok(hook)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn chunk_name(&self) -> String {
    format!("@{}", self.path.display())
  }

  fn script_dir(&self) -> Option<&Path> {
    self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
  }

  fn run(&self, ctx: &BuildContext, output: &mut HookOutput) -> LuaResult<()> {
    let lua = runtime::create_runtime(ctx, self.script_dir())?;

    let result = lua
      .load(&self.source)
      .set_name(self.chunk_name())
      .eval::<LuaValue>()?;

    let entry = match result {
      LuaValue::Function(f) => Some(f),
      LuaValue::Table(t) => t.get::<Option<LuaFunction>>("extend")?,
      _ => None,
    };
    if let Some(extend) = entry {
      let ctx: LuaAnyUserData = lua.globals().get(globals::CTX_GLOBAL)?;
      extend.call::<()>(ctx)?;
    }

    globals::collect_outputs(&lua, output)
  }
}

impl BuildHook for LuaHook {
  fn extend(&self, ctx: &BuildContext, output: &mut HookOutput) -> Result<(), BoxError> {
    self.run(ctx, output)?;
    Ok(())
  }
}
