//! Implementation of the `buildhook check` command.
//!
//! Loads every hook script under the modules root without running it, so
//! missing files and syntax errors show up before a build does.

use std::path::Path;

use anyhow::{Context, Result, bail};

use buildhook_lib::{LuaHook, display_chain};
use buildhook_lib::registry::discover_scripts;

use crate::output::{print_error, print_info, print_success};

pub fn cmd_check(modules_dir: &Path) -> Result<()> {
  let scripts = discover_scripts(modules_dir)
    .with_context(|| format!("Failed to list modules in {}", modules_dir.display()))?;

  if scripts.is_empty() {
    print_info(&format!("No module hooks found in {}", modules_dir.display()));
    return Ok(());
  }

  let mut failed = 0usize;
  for script in &scripts {
    match LuaHook::load(&script.path) {
      Ok(_) => print_success(&script.module),
      Err(e) => {
        failed += 1;
        print_error(&format!("{}: {}", script.module, display_chain(&e)));
      }
    }
  }

  if failed > 0 {
    bail!("{} of {} hook script(s) failed to load", failed, scripts.len());
  }

  print_info(&format!("{} hook script(s) OK", scripts.len()));
  Ok(())
}
