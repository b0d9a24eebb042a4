//! Implementation of the `buildhook list` command.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use buildhook_lib::registry::discover_scripts;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

#[derive(Serialize)]
struct ListEntry<'a> {
  module: &'a str,
  path: String,
}

pub fn cmd_list(modules_dir: &Path, format: OutputFormat) -> Result<()> {
  let scripts = discover_scripts(modules_dir)
    .with_context(|| format!("Failed to list modules in {}", modules_dir.display()))?;

  if format.is_json() {
    let entries: Vec<_> = scripts
      .iter()
      .map(|s| ListEntry {
        module: &s.module,
        path: s.path.display().to_string(),
      })
      .collect();
    return print_json(&entries);
  }

  if scripts.is_empty() {
    print_info(&format!("No module hooks found in {}", modules_dir.display()));
    return Ok(());
  }

  print_info(&format!("{} module hook(s) in {}", scripts.len(), modules_dir.display()));
  for script in &scripts {
    print_stat(&script.module, &script.path.display().to_string());
  }
  Ok(())
}
