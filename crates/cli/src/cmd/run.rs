//! Implementation of the `buildhook run` command.
//!
//! Runs a single hook, either a module's script under the modules root or a
//! script given by path, and prints what it appended.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use buildhook_lib::{HookError, LuaHook, invoke};

use crate::args::ContextArgs;
use crate::output::{OutputFormat, print_hook_output, print_json, print_success};

/// Which hook `run` executes.
pub enum RunTarget {
  Module(String),
  Script(PathBuf),
}

pub fn cmd_run(modules_dir: &Path, target: RunTarget, args: &ContextArgs, format: OutputFormat) -> Result<()> {
  let mut ctx = args.build()?;

  let (label, loaded) = match target {
    RunTarget::Module(module) => {
      if ctx.module_dir.is_empty() {
        ctx.module_dir = modules_dir.join(&module).to_string_lossy().to_string();
      }
      let loaded = LuaHook::load_module(modules_dir, &module);
      (module, loaded)
    }
    RunTarget::Script(path) => (path.display().to_string(), LuaHook::load(&path)),
  };

  ctx.validate().context("Invalid build context")?;

  let hook = loaded.map_err(|source| HookError::Load {
    module: label.clone(),
    source,
  })?;
  let output = invoke(&hook, &label, &ctx)?;

  if format.is_json() {
    print_json(&output)?;
  } else {
    print_success(&format!("Hook for '{}' completed", label));
    print_hook_output(&output);
  }

  Ok(())
}
