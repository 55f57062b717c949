//! Implementation of the `pkgdesc init` command.

use std::path::Path;

use anyhow::{Context, Result};

use pkgdesc_lib::init::{InitOptions, init};

use crate::output::{print_section, print_stat, print_success};

/// Scaffold a recipe directory at `dir`.
///
/// # Errors
///
/// Returns an error if `recipe.toml` already exists or the name is invalid.
pub fn cmd_init(dir: &Path, name: Option<String>, version: String) -> Result<()> {
  let options = InitOptions {
    dir: dir.to_path_buf(),
    name,
    version,
  };

  let result = init(&options).context("Failed to initialize recipe")?;

  print_success(&format!("Initialized {}", result.reference));
  print_stat("Recipe directory", &result.dir.display().to_string());
  print_stat("Recipe", &result.recipe.display().to_string());

  print_section("Next steps:");
  println!("  1. Add CMakeLists.txt, include/ and src/ next to the recipe");
  println!("  2. Run: pkgdesc create {}", result.dir.display());

  Ok(())
}
