//! The optional external dependency a wrapper links against.
//!
//! The wrapped library may be vendored inside the exported sources or left
//! for the build system to find on the host. Either way the choice is
//! explicit in the recipe and resolved before `generate` writes anything.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::util::ident::is_path_segment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepsError {
  #[error("invalid dependency name '{0}': use letters, digits, '_', '-', '+' or '.'")]
  InvalidName(String),

  #[error("dependency '{name}' has an invalid version '{version}'")]
  InvalidVersion { name: String, version: String },

  #[error("vendored path for '{name}' must be relative and stay inside the sources: {}", path.display())]
  InvalidVendoredPath { name: String, path: PathBuf },

  #[error("vendored sources for '{name}' not found at {}", path.display())]
  VendoredMissing { name: String, path: PathBuf },
}

/// Where the dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
  /// Found by the build system on the host (e.g. `find_package`).
  System,
  /// Shipped inside the exported sources at this relative path.
  Vendored(PathBuf),
}

/// A reference to the library being wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalDependency {
  pub name: String,
  pub version: String,
  pub resolution: Resolution,
  /// Whether `generate` writes dependency files for the build system.
  #[serde(default = "default_generate_files")]
  pub generate_files: bool,
}

fn default_generate_files() -> bool {
  true
}

/// A dependency after resolution against an exported source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
  pub name: String,
  pub version: String,
  pub resolution: Resolution,
  /// Absolute root of vendored sources; `None` for system dependencies.
  pub root: Option<PathBuf>,
  /// Include folder to expose to the build; `None` for system dependencies.
  pub include_dir: Option<PathBuf>,
}

impl ExternalDependency {
  pub fn validate(&self) -> Result<(), DepsError> {
    if !is_path_segment(&self.name) {
      return Err(DepsError::InvalidName(self.name.clone()));
    }
    if !is_path_segment(&self.version) {
      return Err(DepsError::InvalidVersion {
        name: self.name.clone(),
        version: self.version.clone(),
      });
    }
    if let Resolution::Vendored(path) = &self.resolution {
      let escapes = path.is_absolute()
        || path
          .components()
          .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir));
      if escapes || path.as_os_str().is_empty() {
        return Err(DepsError::InvalidVendoredPath {
          name: self.name.clone(),
          path: path.clone(),
        });
      }
    }
    Ok(())
  }

  /// Resolve against the exported source root.
  ///
  /// A vendored dependency must exist on disk. Its include folder is
  /// `<root>/include` when present, otherwise the root itself.
  pub fn resolve(&self, source_root: &Path) -> Result<ResolvedDependency, DepsError> {
    self.validate()?;

    let (root, include_dir) = match &self.resolution {
      Resolution::System => {
        debug!(name = %self.name, "dependency left to the build system");
        (None, None)
      }
      Resolution::Vendored(relative) => {
        let root = source_root.join(relative);
        if !root.is_dir() {
          return Err(DepsError::VendoredMissing {
            name: self.name.clone(),
            path: root,
          });
        }
        let include = root.join("include");
        let include_dir = if include.is_dir() { include } else { root.clone() };
        info!(name = %self.name, root = %root.display(), "resolved vendored dependency");
        (Some(root), Some(include_dir))
      }
    };

    Ok(ResolvedDependency {
      name: self.name.clone(),
      version: self.version.clone(),
      resolution: self.resolution.clone(),
      root,
      include_dir,
    })
  }
}
