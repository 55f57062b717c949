//! Package recipes.
//!
//! A recipe is the declarative half of a package descriptor: identity,
//! option defaults, the exported source set, an optional external
//! dependency and the consumption info handed to downstream projects. It is
//! read from `recipe.toml` and validated before any lifecycle step runs.
//!
//! ```toml
//! [package]
//! name = "slog"
//! version = "1.0.0"
//! license = "MIT"
//! topics = ["spdlog", "log", "logger"]
//!
//! [options]
//! shared = false
//! fPIC = true
//!
//! [sources]
//! layout = "flat"
//! ```

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::RECIPE_FILE;
use crate::deps::DepsError;
use crate::util::glob::{GlobError, compile_all};
use crate::util::ident::is_path_segment;

pub use types::*;

#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("recipe not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read recipe {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse recipe {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("invalid package name '{0}': use lowercase letters, digits, '_', '-', '+' or '.'")]
  InvalidName(String),

  #[error("invalid package version '{0}': use letters, digits, '_', '-', '+' or '.'")]
  InvalidVersion(String),

  #[error("recipe exports no sources")]
  NoExports,

  #[error(transparent)]
  Pattern(#[from] GlobError),

  #[error(transparent)]
  Dependency(#[from] DepsError),

  #[error("package_info must declare at least one library")]
  NoLibraries,
}

impl Recipe {
  /// Load a recipe from a recipe folder or a direct path to a recipe file.
  ///
  /// Returns the recipe together with the folder it was found in, which is
  /// the root that export globs are matched against.
  pub fn load(path: &Path) -> Result<(Self, PathBuf), RecipeError> {
    let file = if path.is_dir() { path.join(RECIPE_FILE) } else { path.to_path_buf() };

    if !file.is_file() {
      return Err(RecipeError::NotFound { path: file });
    }

    let content = fs::read_to_string(&file).map_err(|source| RecipeError::Read {
      path: file.clone(),
      source,
    })?;

    let recipe = Self::parse(&content).map_err(|e| match e {
      RecipeError::Parse { source, .. } => RecipeError::Parse {
        path: file.clone(),
        source,
      },
      other => other,
    })?;

    let root = file.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let root = dunce::canonicalize(&root).unwrap_or(root);

    debug!(reference = %recipe.reference(), root = %root.display(), "loaded recipe");
    Ok((recipe, root))
  }

  /// Parse and validate recipe TOML.
  pub fn parse(content: &str) -> Result<Self, RecipeError> {
    let recipe: Recipe = toml::from_str(content).map_err(|source| RecipeError::Parse {
      path: PathBuf::from(RECIPE_FILE),
      source,
    })?;
    recipe.validate()?;
    Ok(recipe)
  }

  pub fn validate(&self) -> Result<(), RecipeError> {
    let name = &self.package.name;
    // name and version become folders under the cache home
    if !is_path_segment(name) || name.chars().any(|c| c.is_ascii_uppercase()) {
      return Err(RecipeError::InvalidName(name.clone()));
    }
    if !is_path_segment(&self.package.version) {
      return Err(RecipeError::InvalidVersion(self.package.version.clone()));
    }

    let exports = self.exports();
    if exports.is_empty() {
      return Err(RecipeError::NoExports);
    }
    compile_all(&exports)?;

    if let Some(dependency) = &self.dependency {
      dependency.validate()?;
    }

    if self.package_info().libs.is_empty() {
      return Err(RecipeError::NoLibraries);
    }

    Ok(())
  }
}
