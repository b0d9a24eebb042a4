//! Implementation of the `buildhook batch` command.
//!
//! Reads a JSON array of `{ "module": ..., "context": { ... } }` entries and
//! runs the hook of each module, in parallel. Only the scripts of the listed
//! modules are loaded, each on the worker that runs it, so a script that
//! fails to load is a failure of that module alone.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use buildhook_lib::{BuildHook, FailurePolicy, HookOutput, LuaHook, ModuleBuild, display_chain, invoke_all_with};

use crate::output::{OutputFormat, print_hook_output, print_json, print_success, print_warning};

#[derive(Serialize)]
struct BatchEntry<'a> {
  module: &'a str,
  #[serde(flatten)]
  output: &'a HookOutput,
}

#[derive(Serialize)]
struct BatchFailure<'a> {
  module: &'a str,
  error: String,
}

#[derive(Serialize)]
struct BatchJson<'a> {
  outputs: Vec<BatchEntry<'a>>,
  failures: Vec<BatchFailure<'a>>,
}

pub fn cmd_batch(modules_dir: &Path, file: &Path, keep_going: bool, format: OutputFormat) -> Result<()> {
  let content = fs::read_to_string(file).with_context(|| format!("Failed to read batch file: {}", file.display()))?;
  let builds: Vec<ModuleBuild> =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse batch file: {}", file.display()))?;

  for build in &builds {
    build
      .context
      .validate()
      .with_context(|| format!("Invalid build context for module '{}'", build.module))?;
  }

  let policy = if keep_going {
    FailurePolicy::Skip
  } else {
    FailurePolicy::Abort
  };
  let report = invoke_all_with(&builds, policy, |module| {
    let hook = LuaHook::load_module(modules_dir, module)?;
    Ok(Arc::new(hook) as Arc<dyn BuildHook>)
  })?;

  if format.is_json() {
    let json = BatchJson {
      outputs: report
        .outputs
        .iter()
        .map(|(module, output)| BatchEntry { module, output })
        .collect(),
      failures: report
        .failures
        .iter()
        .map(|err| BatchFailure {
          module: err.module(),
          error: display_chain(err),
        })
        .collect(),
    };
    return print_json(&json);
  }

  for (module, output) in &report.outputs {
    print_success(module);
    print_hook_output(output);
  }
  for err in &report.failures {
    print_warning(&format!("skipped: {}", display_chain(err)));
  }

  Ok(())
}
