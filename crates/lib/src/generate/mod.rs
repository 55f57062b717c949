//! The `generate` step: toolchain and dependency files for the build system.
//!
//! Settings are validated first and the dependency is resolved before any
//! file is written, so a bad configuration leaves the generators folder
//! untouched.

pub mod deps;
pub mod toolchain;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{DEPENDENCIES_FILE, TOOLCHAIN_FILE};
use crate::deps::{DepsError, ExternalDependency, ResolvedDependency};
use crate::layout::Folders;
use crate::options::BuildOptions;
use crate::platform::os::Os;
use crate::settings::{BuildSettings, SettingsError};

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Settings(#[from] SettingsError),

  #[error(transparent)]
  Dependency(#[from] DepsError),

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("failed to serialize dependency manifest: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Inputs to `generate`.
pub struct GenerateRequest<'a> {
  pub reference: &'a str,
  pub settings: &'a BuildSettings,
  pub options: &'a BuildOptions,
  pub folders: &'a Folders,
  pub dependency: Option<&'a ExternalDependency>,
  /// OS the build runs on; `None` when it could not be detected.
  pub host: Option<Os>,
}

/// Files written by `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
  pub toolchain: PathBuf,
  pub dependency_files: Vec<PathBuf>,
  pub dependency: Option<ResolvedDependency>,
}

pub fn generate(request: &GenerateRequest<'_>) -> Result<GeneratedFiles, GenerateError> {
  request.settings.validate()?;

  let resolved = request
    .dependency
    .map(|dep| dep.resolve(&request.folders.source))
    .transpose()?;

  let emit_dependency_files = request.dependency.map(|dep| dep.generate_files).unwrap_or(false);
  let toolchain_dependency = if emit_dependency_files { resolved.as_ref() } else { None };

  let generators = &request.folders.generators;
  fs::create_dir_all(generators).map_err(|source| GenerateError::Write {
    path: generators.clone(),
    source,
  })?;

  let toolchain = generators.join(TOOLCHAIN_FILE);
  write_file(
    &toolchain,
    &toolchain::render_toolchain(
      request.reference,
      request.settings,
      request.options,
      toolchain_dependency,
      request.host,
    ),
  )?;

  let mut dependency_files = Vec::new();
  if let Some(dep) = toolchain_dependency {
    if let Some(config) = deps::render_config(dep) {
      let path = generators.join(format!("{}-config.cmake", dep.name));
      write_file(&path, &config)?;
      dependency_files.push(path);
    }
    if let Some(version) = deps::render_config_version(dep) {
      let path = generators.join(format!("{}-config-version.cmake", dep.name));
      write_file(&path, &version)?;
      dependency_files.push(path);
    }

    let manifest = generators.join(DEPENDENCIES_FILE);
    let mut json = serde_json::to_string_pretty(&[dep])?;
    json.push('\n');
    write_file(&manifest, &json)?;
    dependency_files.push(manifest);
  } else if let Some(dep) = &resolved {
    debug!(name = %dep.name, "dependency files disabled by recipe");
  }

  info!(
    toolchain = %toolchain.display(),
    dependency_files = dependency_files.len(),
    "generated build files"
  );

  Ok(GeneratedFiles {
    toolchain,
    dependency_files,
    dependency: resolved,
  })
}

fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
  fs::write(path, content).map_err(|source| GenerateError::Write {
    path: path.to_path_buf(),
    source,
  })
}
