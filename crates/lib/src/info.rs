//! Consumption info published to downstream projects.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PACKAGE_INFO_FILE;

#[derive(Debug, Error)]
pub enum InfoError {
  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to serialize package info: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// What a consumer links against and adds to its include path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageInfo {
  pub libs: Vec<String>,
  #[serde(default = "default_includedirs")]
  pub includedirs: Vec<String>,
}

fn default_includedirs() -> Vec<String> {
  vec!["include".to_string()]
}

impl PackageInfo {
  /// A single library with the conventional `include` folder.
  pub fn for_library(name: &str) -> Self {
    Self {
      libs: vec![name.to_string()],
      includedirs: default_includedirs(),
    }
  }

  /// Write `package_info.json` into the package folder.
  pub fn write(&self, package_folder: &Path) -> Result<PathBuf, InfoError> {
    let path = package_folder.join(PACKAGE_INFO_FILE);
    let mut json = serde_json::to_string_pretty(self)?;
    json.push('\n');
    fs::write(&path, json).map_err(|source| InfoError::Write {
      path: path.clone(),
      source,
    })?;
    Ok(path)
  }

  /// Read `package_info.json` back from a package folder.
  pub fn read(package_folder: &Path) -> Result<Self, InfoError> {
    let path = package_folder.join(PACKAGE_INFO_FILE);
    let content = fs::read_to_string(&path).map_err(|source| InfoError::Read {
      path: path.clone(),
      source,
    })?;
    Ok(serde_json::from_str(&content)?)
  }
}
