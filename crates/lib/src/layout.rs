//! Folder layout for one package configuration.
//!
//! Follows the usual CMake convention: a single-config toolchain builds into
//! `build/<build_type>`, a multi-config one (msvc) into `build`, and generated
//! files go to `generators` inside the build folder.
//!
//! ```text
//! <home>/<name>/<version>/<package_id>/
//!   source/                     exported snapshot
//!   build/Release/              build tree
//!   build/Release/generators/   toolchain and dependency files
//!   package/                    installed package
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::recipe::SourceLayout;
use crate::settings::BuildSettings;
use crate::util::hash::PackageId;

/// Every folder a lifecycle step reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folders {
  /// Root of this configuration in the cache.
  pub base: PathBuf,
  /// Exported source snapshot.
  pub source: PathBuf,
  /// Folder holding the top-level `CMakeLists.txt`.
  pub cmake_source: PathBuf,
  /// Folder whose headers are overlaid into the package.
  pub headers: PathBuf,
  pub build: PathBuf,
  pub generators: PathBuf,
  pub package: PathBuf,
}

/// Cache folder for one package configuration.
pub fn package_base(home: &Path, name: &str, version: &str, id: &PackageId) -> PathBuf {
  home.join(name).join(version).join(&id.0)
}

/// Lay out the folders under `base` for the given settings.
pub fn cmake_layout(base: &Path, layout: SourceLayout, settings: &BuildSettings) -> Folders {
  let source = base.join("source");

  let build = if settings.is_multi_config() {
    base.join("build")
  } else {
    base.join("build").join(settings.build_type.as_str())
  };

  let cmake_source = match layout.cmake_dir() {
    "." => source.clone(),
    dir => source.join(dir),
  };

  Folders {
    base: base.to_path_buf(),
    cmake_source,
    headers: source.join(layout.header_dir()),
    generators: build.join("generators"),
    build,
    package: base.join("package"),
    source,
  }
}
