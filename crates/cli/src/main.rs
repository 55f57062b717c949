mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::CreateArgs;
use crate::output::{OutputFormat, print_error};

/// pkgdesc - build and package CMake libraries from a recipe
#[derive(Parser)]
#[command(name = "pkgdesc")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Export, build and package a recipe
  Create {
    /// Recipe directory or recipe.toml path
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Profile file with [settings] and [options] tables
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Override a setting (os, arch, compiler, compiler.version, build_type)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    settings: Vec<String>,

    /// Override an option (shared, fPIC)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// CMake generator to use
    #[arg(short = 'G', long)]
    generator: Option<String>,

    /// Parallel build jobs
    #[arg(short, long)]
    jobs: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Show what a recipe declares without building it
  Inspect {
    /// Recipe directory or recipe.toml path
    #[arg(default_value = ".")]
    dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Show detected host settings and tool locations
  Info,

  /// Scaffold a new recipe directory
  Init {
    /// Directory to initialize
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Package name (defaults to the directory name)
    #[arg(long)]
    name: Option<String>,

    /// Package version
    #[arg(long, default_value = "0.1.0")]
    version: String,
  },
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli.command) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Create {
      dir,
      profile,
      settings,
      options,
      generator,
      jobs,
      format,
    } => cmd::cmd_create(&CreateArgs {
      dir,
      profile,
      settings,
      options,
      generator,
      jobs,
      output: format,
    }),
    Commands::Inspect { dir, format } => cmd::cmd_inspect(&dir, format),
    Commands::Info => cmd::cmd_info(),
    Commands::Init { dir, name, version } => cmd::cmd_init(&dir, name, version),
  }
}
