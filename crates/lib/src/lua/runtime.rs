use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::consts::SCRIPT_LOG_TARGET;
use crate::context::BuildContext;
use crate::lua::globals;

/// Create a fresh Lua VM for one hook invocation.
///
/// Registers the context globals, the empty output arrays and the helper
/// functions, routes `print` to the log, and prepends `script_dir` (if any)
/// to `package.path` so scripts can `require` sibling files.
pub fn create_runtime(ctx: &BuildContext, script_dir: Option<&Path>) -> LuaResult<Lua> {
  let lua = Lua::new();

  if let Some(dir) = script_dir {
    prepend_package_path(&lua, dir)?;
  }

  globals::register_globals(&lua, ctx)?;
  redirect_print(&lua)?;

  Ok(lua)
}

fn prepend_package_path(lua: &Lua, dir: &Path) -> LuaResult<()> {
  let package: LuaTable = lua.globals().get("package")?;
  let current_path: String = package.get("path")?;

  let dir_str = dir.to_string_lossy().replace('\\', "/");
  let new_path = format!("{dir_str}/?.lua;{dir_str}/?/init.lua;{current_path}");
  package.set("path", new_path)?;

  debug!(dir = %dir_str, "added script directory to package.path");
  Ok(())
}

/// Replace `print` so script output goes through `tracing` rather than stdout.
fn redirect_print(lua: &Lua) -> LuaResult<()> {
  let print = lua.create_function(|lua, args: LuaMultiValue| {
    let tostring: LuaFunction = lua.globals().get("tostring")?;
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
      parts.push(tostring.call::<String>(arg)?);
    }
    info!(target: SCRIPT_LOG_TARGET, "{}", parts.join("\t"));
    Ok(())
  })?;
  lua.globals().set("print", print)
}
