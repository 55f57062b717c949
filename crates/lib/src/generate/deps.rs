//! CMake package config files for a resolved dependency.

use crate::deps::ResolvedDependency;
use crate::generate::toolchain::cmake_path;

/// Render `<name>-config.cmake` exposing an `<name>::<name>` interface target.
///
/// Only vendored dependencies get a config file; `None` otherwise.
pub fn render_config(dep: &ResolvedDependency) -> Option<String> {
  let include = cmake_path(dep.include_dir.as_deref()?);
  let name = &dep.name;

  Some(format!(
    r#"# Dependency {name}/{version} (vendored) generated by pkgdesc
set({name}_FOUND TRUE)
set({name}_VERSION "{version}")
set({name}_INCLUDE_DIRS "{include}")

if(NOT TARGET {name}::{name})
  add_library({name}::{name} INTERFACE IMPORTED)
  set_target_properties({name}::{name} PROPERTIES
    INTERFACE_INCLUDE_DIRECTORIES "{include}")
endif()
"#,
    version = dep.version,
  ))
}

/// Render `<name>-config-version.cmake` for a vendored dependency.
///
/// Any requested version up to the vendored one is compatible.
pub fn render_config_version(dep: &ResolvedDependency) -> Option<String> {
  dep.include_dir.as_ref()?;

  Some(format!(
    r#"set(PACKAGE_VERSION "{version}")
if(PACKAGE_FIND_VERSION VERSION_GREATER PACKAGE_VERSION)
  set(PACKAGE_VERSION_COMPATIBLE FALSE)
else()
  set(PACKAGE_VERSION_COMPATIBLE TRUE)
  if(PACKAGE_FIND_VERSION STREQUAL PACKAGE_VERSION)
    set(PACKAGE_VERSION_EXACT TRUE)
  endif()
endif()
"#,
    version = dep.version,
  ))
}
