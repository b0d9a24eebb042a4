mod args;
mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use buildhook_lib::consts::SCRIPT_LOG_TARGET;
use buildhook_lib::paths::modules_dir;

use crate::args::ContextArgs;
use crate::cmd::{RunTarget, cmd_batch, cmd_check, cmd_list, cmd_run};
use crate::output::OutputFormat;

/// buildhook - per-module build customization hooks
#[derive(Parser)]
#[command(name = "buildhook")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Modules root (default: $BUILDHOOK_MODULES_DIR or ./modules)
  #[arg(long, global = true, value_name = "DIR")]
  modules_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run one module's hook and print what it appended
  Run {
    /// Module whose build_scripts/setup.lua to run
    #[arg(required_unless_present = "script")]
    module: Option<String>,

    /// Run this script instead of a module's hook
    #[arg(long, value_name = "FILE", conflicts_with = "module")]
    script: Option<PathBuf>,

    #[command(flatten)]
    context: ContextArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Run the hooks of several modules from a JSON batch file
  Batch {
    /// JSON array of { "module": ..., "context": { ... } }
    file: PathBuf,

    /// Skip modules whose hook fails instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// List modules that ship a hook script
  List {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Load every hook script and report missing files or syntax errors
  Check,
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", SCRIPT_LOG_TARGET)))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let modules_dir = cli.modules_dir.unwrap_or_else(modules_dir);
  debug!(modules_dir = %modules_dir.display(), "resolved modules root");

  match cli.command {
    Commands::Run {
      module,
      script,
      context,
      format,
    } => {
      let target = match (module, script) {
        (_, Some(path)) => RunTarget::Script(path),
        (Some(module), None) => RunTarget::Module(module),
        (None, None) => unreachable!("clap requires a module or --script"),
      };
      cmd_run(&modules_dir, target, &context, format)
    }
    Commands::Batch {
      file,
      keep_going,
      format,
    } => cmd_batch(&modules_dir, &file, keep_going, format),
    Commands::List { format } => cmd_list(&modules_dir, format),
    Commands::Check => cmd_check(&modules_dir),
  }
}
