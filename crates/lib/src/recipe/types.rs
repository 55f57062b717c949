use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::deps::ExternalDependency;
use crate::info::PackageInfo;
use crate::options::OptionDefaults;

/// Identity and descriptive metadata of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageIdentity {
  pub name: String,
  pub version: String,
  #[serde(default)]
  pub license: Option<String>,
  #[serde(default)]
  pub author: Option<String>,
  #[serde(default)]
  pub url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub topics: BTreeSet<String>,
}

impl PackageIdentity {
  /// `name/version`, the key that identifies a package to consumers.
  pub fn reference(&self) -> String {
    format!("{}/{}", self.name, self.version)
  }
}

/// How the wrapper sources are arranged inside the recipe folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLayout {
  /// `CMakeLists.txt`, `include/` and `src/` at the recipe root.
  #[default]
  Flat,
  /// Everything for the wrapper lives under `wrapping/`.
  Wrapping,
}

impl SourceLayout {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Flat => "flat",
      Self::Wrapping => "wrapping",
    }
  }

  pub fn default_exports(&self) -> Vec<String> {
    let patterns: &[&str] = match self {
      Self::Flat => &["CMakeLists.txt", "include/*", "src/*", "spdlog/*"],
      Self::Wrapping => &["wrapping/*", "spdlog/*"],
    };
    patterns.iter().map(|p| p.to_string()).collect()
  }

  /// Folder holding the top-level `CMakeLists.txt`, relative to the source root.
  pub fn cmake_dir(&self) -> &'static str {
    match self {
      Self::Flat => ".",
      Self::Wrapping => "wrapping",
    }
  }

  /// Folder whose headers are overlaid into the package, relative to the source root.
  pub fn header_dir(&self) -> &'static str {
    match self {
      Self::Flat => "include",
      Self::Wrapping => "wrapping/include",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
  #[serde(default)]
  pub layout: SourceLayout,
  /// Explicit export globs; the layout's defaults apply when absent.
  #[serde(default)]
  pub exports: Option<Vec<String>>,
}

/// A package recipe as written in `recipe.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
  pub package: PackageIdentity,
  #[serde(default)]
  pub options: OptionDefaults,
  #[serde(default)]
  pub sources: Sources,
  #[serde(default)]
  pub dependency: Option<ExternalDependency>,
  #[serde(default)]
  pub package_info: Option<PackageInfo>,
}

impl Recipe {
  pub fn reference(&self) -> String {
    self.package.reference()
  }

  pub fn layout(&self) -> SourceLayout {
    self.sources.layout
  }

  /// Effective export globs, in declaration order.
  pub fn exports(&self) -> Vec<String> {
    self
      .sources
      .exports
      .clone()
      .unwrap_or_else(|| self.sources.layout.default_exports())
  }

  /// What consumers link against and include. Independent of options.
  pub fn package_info(&self) -> PackageInfo {
    self
      .package_info
      .clone()
      .unwrap_or_else(|| PackageInfo::for_library(&self.package.name))
  }
}
