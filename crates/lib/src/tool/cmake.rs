//! CMake as the downstream build system.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::consts::CMAKE_ENV;
use crate::tool::exec::run_tool;
use crate::tool::{BuildTool, ToolContext, ToolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMake {
  program: PathBuf,
  generator: Option<String>,
  jobs: Option<usize>,
}

impl CMake {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      generator: None,
      jobs: None,
    }
  }

  /// Find cmake: `PKGDESC_CMAKE` first, then `PATH`.
  pub fn locate() -> Result<Self, ToolError> {
    if let Ok(path) = std::env::var(CMAKE_ENV) {
      debug!(path = %path, "using cmake from environment");
      return Ok(Self::new(path));
    }

    which::which("cmake")
      .map(Self::new)
      .map_err(|_| ToolError::NotFound("cmake".to_string()))
  }

  pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
    self.generator = Some(generator.into());
    self
  }

  pub fn with_jobs(mut self, jobs: usize) -> Self {
    self.jobs = Some(jobs);
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn configure_args(&self, ctx: &ToolContext<'_>) -> Vec<OsString> {
    let mut args = vec![
      OsString::from("-S"),
      ctx.folders.cmake_source.clone().into_os_string(),
      OsString::from("-B"),
      ctx.folders.build.clone().into_os_string(),
    ];
    if let Some(generator) = &self.generator {
      args.push(OsString::from("-G"));
      args.push(OsString::from(generator));
    }
    args.push(define("CMAKE_TOOLCHAIN_FILE", ctx.toolchain));
    args.push(define("CMAKE_INSTALL_PREFIX", &ctx.folders.package));
    args
  }

  pub fn build_args(&self, ctx: &ToolContext<'_>) -> Vec<OsString> {
    let mut args = vec![
      OsString::from("--build"),
      ctx.folders.build.clone().into_os_string(),
      OsString::from("--config"),
      OsString::from(ctx.settings.build_type.as_str()),
    ];
    if let Some(jobs) = self.jobs {
      args.push(OsString::from("--parallel"));
      args.push(OsString::from(jobs.to_string()));
    }
    args
  }

  pub fn install_args(&self, ctx: &ToolContext<'_>) -> Vec<OsString> {
    vec![
      OsString::from("--install"),
      ctx.folders.build.clone().into_os_string(),
      OsString::from("--config"),
      OsString::from(ctx.settings.build_type.as_str()),
      OsString::from("--prefix"),
      ctx.folders.package.clone().into_os_string(),
    ]
  }
}

fn define(name: &str, path: &Path) -> OsString {
  let mut arg = OsString::from(format!("-D{}=", name));
  arg.push(path.as_os_str());
  arg
}

#[async_trait]
impl BuildTool for CMake {
  fn name(&self) -> &str {
    "cmake"
  }

  async fn configure(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    run_tool(&self.program, &self.configure_args(ctx), &ctx.folders.build).await?;
    Ok(())
  }

  async fn build(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    run_tool(&self.program, &self.build_args(ctx), &ctx.folders.build).await?;
    Ok(())
  }

  async fn install(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    run_tool(&self.program, &self.install_args(ctx), &ctx.folders.build).await?;
    Ok(())
  }
}
