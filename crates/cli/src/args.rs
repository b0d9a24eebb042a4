//! Command-line arguments describing a build context.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use buildhook_lib::BuildContext;

/// Build context given as a JSON file, individual flags, or both.
///
/// Flags override values read from the file.
#[derive(Debug, Default, Args)]
pub struct ContextArgs {
  /// JSON file holding the build context
  #[arg(long, value_name = "FILE")]
  pub context: Option<PathBuf>,

  /// Build-tool generator (e.g. "Ninja")
  #[arg(long)]
  pub generator: Option<String>,

  /// Build configuration (e.g. "RelWithDebInfo")
  #[arg(long)]
  pub build_config: Option<String>,

  /// Source location of the module
  #[arg(long)]
  pub module_url: Option<String>,

  /// Module directory
  #[arg(long, value_name = "DIR")]
  pub module_dir: Option<String>,

  /// Project root directory
  #[arg(long, value_name = "DIR")]
  pub root: Option<String>,

  /// Build directory
  #[arg(long, value_name = "DIR")]
  pub build_dir: Option<String>,

  /// Dependencies directory
  #[arg(long, value_name = "DIR")]
  pub deps_dir: Option<String>,

  /// Install directory
  #[arg(long, value_name = "DIR")]
  pub install_dir: Option<String>,
}

impl ContextArgs {
  /// Assemble the context. Missing fields are left empty; callers validate.
  pub fn build(&self) -> Result<BuildContext> {
    let mut ctx = match &self.context {
      Some(path) => read_context(path)?,
      None => BuildContext::default(),
    };

    let overrides = [
      (&self.generator, &mut ctx.generator),
      (&self.build_config, &mut ctx.build_config),
      (&self.module_url, &mut ctx.module_url),
      (&self.module_dir, &mut ctx.module_dir),
      (&self.root, &mut ctx.root),
      (&self.build_dir, &mut ctx.build_dir),
      (&self.deps_dir, &mut ctx.deps_dir),
      (&self.install_dir, &mut ctx.install_dir),
    ];
    for (flag, field) in overrides {
      if let Some(value) = flag {
        *field = value.clone();
      }
    }

    Ok(ctx)
  }
}

fn read_context(path: &Path) -> Result<BuildContext> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read context file: {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse context file: {}", path.display()))
}
