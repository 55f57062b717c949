//! The downstream build system seam.
//!
//! The descriptor drives a [`BuildTool`] through configure, build and
//! install. [`CMake`] runs the real `cmake` executable; tests substitute
//! their own implementation.

pub mod cmake;
pub mod exec;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::layout::Folders;
use crate::settings::BuildSettings;

pub use cmake::CMake;

#[derive(Debug, Error)]
pub enum ToolError {
  #[error("{0} not found on PATH")]
  NotFound(String),

  #[error("failed to run {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// The tool ran and failed; `stdout` and `stderr` are its diagnostic, unmodified.
  #[error("command failed with exit code {code:?}: {cmd}\n{stdout}{stderr}")]
  Failed {
    cmd: String,
    code: Option<i32>,
    stdout: String,
    stderr: String,
  },
}

/// What a build tool needs to know about the current invocation.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
  pub settings: &'a BuildSettings,
  pub folders: &'a Folders,
  pub toolchain: &'a Path,
}

#[async_trait]
pub trait BuildTool: Send + Sync {
  fn name(&self) -> &str;

  /// Configure the build tree from the generated toolchain.
  async fn configure(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError>;

  /// Compile.
  async fn build(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError>;

  /// Install build outputs into the package folder.
  async fn install(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError>;
}
