//! Scaffold a new recipe directory.
//!
//! Writes a `recipe.toml` for the flat source layout, with the package
//! name and version filled in.

mod templates;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::consts::RECIPE_FILE;
use crate::recipe::{Recipe, RecipeError};

pub use templates::RECIPE_TEMPLATE;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("cannot derive a package name from {}; pass one explicitly", path.display())]
  NoName { path: PathBuf },

  #[error("generated recipe is invalid: {0}")]
  Recipe(#[from] RecipeError),
}

/// Options for initializing a recipe directory.
pub struct InitOptions {
  /// Directory to create the recipe in
  pub dir: PathBuf,
  /// Package name; defaults to the directory name, lowercased
  pub name: Option<String>,
  /// Package version
  pub version: String,
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// The recipe directory (canonicalized)
  pub dir: PathBuf,
  /// Path to the created recipe.toml
  pub recipe: PathBuf,
  /// Reference of the scaffolded package
  pub reference: String,
}

/// Initialize a new recipe directory.
///
/// # Errors
///
/// Returns an error if:
/// - `recipe.toml` already exists
/// - No valid package name is given or derivable
/// - Directory creation or file writing fails
pub fn init(options: &InitOptions) -> Result<InitResult, InitError> {
  fs::create_dir_all(&options.dir).map_err(|e| InitError::CreateDir {
    path: options.dir.clone(),
    source: e,
  })?;
  let dir = dunce::canonicalize(&options.dir).unwrap_or_else(|_| options.dir.clone());

  let recipe_path = dir.join(RECIPE_FILE);
  if recipe_path.exists() {
    return Err(InitError::PathExists { path: recipe_path });
  }

  let name = match &options.name {
    Some(name) => name.clone(),
    None => dir
      .file_name()
      .map(|n| n.to_string_lossy().to_lowercase())
      .ok_or_else(|| InitError::NoName { path: dir.clone() })?,
  };

  let content = RECIPE_TEMPLATE
    .replace("{name}", &name)
    .replace("{version}", &options.version);

  // Never write a recipe that would not load back
  let recipe = Recipe::parse(&content)?;

  fs::write(&recipe_path, content).map_err(|e| InitError::WriteFile {
    path: recipe_path.clone(),
    source: e,
  })?;

  info!(path = %recipe_path.display(), reference = %recipe.reference(), "initialized recipe");

  Ok(InitResult {
    dir,
    recipe: recipe_path,
    reference: recipe.reference(),
  })
}
