//! Hook invocation.
//!
//! [`invoke`] runs one hook against a fresh [`HookOutput`] and hands the
//! output to the caller. [`invoke_all`] does the same for many modules at
//! once, each with its own context and output, on the rayon thread pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::{BuildContext, HookOutput};
use crate::error::{HookError, LoadError, display_chain};
use crate::hook::BuildHook;
use crate::registry::HookRegistry;

/// Run `hook` for `module` and return what it appended.
pub fn invoke(hook: &dyn BuildHook, module: &str, ctx: &BuildContext) -> Result<HookOutput, HookError> {
  info!(
    module = %module,
    generator = %ctx.generator,
    build_config = %ctx.build_config,
    "running build hook"
  );

  let mut output = HookOutput::new();
  hook
    .extend(ctx, &mut output)
    .map_err(|source| HookError::Runtime {
      module: module.to_string(),
      source,
    })?;

  info!(
    module = %module,
    cmake_args = output.cmake_args().len(),
    build_targets = output.additional_build_targets().len(),
    "build hook finished"
  );
  Ok(output)
}

/// Look up the hook registered for `module` and run it.
pub fn invoke_module(registry: &HookRegistry, module: &str, ctx: &BuildContext) -> Result<HookOutput, HookError> {
  let hook = registry.get(module).ok_or_else(|| HookError::Load {
    module: module.to_string(),
    source: LoadError::NotRegistered,
  })?;
  invoke(hook.as_ref(), module, ctx)
}

/// What to do when one module's hook fails during [`invoke_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
  /// Return the first failure (in input order) as the batch result.
  #[default]
  Abort,
  /// Log the failure, record it in the report and keep the other outputs.
  Skip,
}

/// One module build to run a hook for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBuild {
  pub module: String,
  pub context: BuildContext,
}

/// Result of [`invoke_all`], in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
  pub outputs: Vec<(String, HookOutput)>,
  pub failures: Vec<HookError>,
}

impl BatchReport {
  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn output(&self, module: &str) -> Option<&HookOutput> {
    self
      .outputs
      .iter()
      .find(|(name, _)| name == module)
      .map(|(_, output)| output)
  }
}

/// Run the registered hook of every module in `builds` concurrently.
pub fn invoke_all(
  registry: &HookRegistry,
  builds: &[ModuleBuild],
  policy: FailurePolicy,
) -> Result<BatchReport, HookError> {
  invoke_all_with(builds, policy, |module| {
    registry.get(module).ok_or(LoadError::NotRegistered)
  })
}

/// Like [`invoke_all`], but asks `resolve` for each module's hook.
///
/// `resolve` runs on the worker thread of its build, so a hook that fails to
/// load becomes a [`HookError::Load`] for that module and is handled by
/// `policy` like any other failure.
///
/// Under [`FailurePolicy::Abort`], builds after a failed one (in input order)
/// that have not started yet are not run. Builds already running, and every
/// build before the failure, still run to completion.
pub fn invoke_all_with<F>(builds: &[ModuleBuild], policy: FailurePolicy, resolve: F) -> Result<BatchReport, HookError>
where
  F: Fn(&str) -> Result<Arc<dyn BuildHook>, LoadError> + Sync,
{
  let first_failure = AtomicUsize::new(usize::MAX);

  let results: Vec<Option<Result<HookOutput, HookError>>> = builds
    .par_iter()
    .enumerate()
    .map(|(index, build)| {
      if policy == FailurePolicy::Abort && index > first_failure.load(Ordering::Acquire) {
        return None;
      }

      let result = resolve(&build.module)
        .map_err(|source| HookError::Load {
          module: build.module.clone(),
          source,
        })
        .and_then(|hook| invoke(hook.as_ref(), &build.module, &build.context));
      if result.is_err() {
        first_failure.fetch_min(index, Ordering::AcqRel);
      }
      Some(result)
    })
    .collect();

  let mut report = BatchReport::default();
  for (build, result) in builds.iter().zip(results) {
    // Only builds after an earlier failure are skipped, and that failure
    // returns below before they are reached.
    let Some(result) = result else {
      continue;
    };
    match result {
      Ok(output) => report.outputs.push((build.module.clone(), output)),
      Err(err) => match policy {
        FailurePolicy::Abort => return Err(err),
        FailurePolicy::Skip => {
          warn!(
            module = %build.module,
            error = %display_chain(&err),
            "skipping module after hook failure"
          );
          report.failures.push(err);
        }
      },
    }
  }

  Ok(report)
}
