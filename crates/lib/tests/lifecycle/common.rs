//! Shared helpers: a fake build tool and recipe fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pkgdesc_lib::create::CreateOptions;
use pkgdesc_lib::platform::os::Os;
use pkgdesc_lib::profile::Profile;
use pkgdesc_lib::settings::SettingsProfile;
use pkgdesc_lib::tool::{BuildTool, ToolContext, ToolError};
use tempfile::TempDir;

pub const SLOG_RECIPE: &str = r#"
[package]
name = "slog"
version = "1.0.0"
license = "MIT"
description = "Wrapper for spdlog"
topics = ["spdlog", "log", "logger"]

[options]
shared = false
fPIC = true
"#;

pub const WRAPPING_RECIPE: &str = r#"
[package]
name = "slog"
version = "1.0.0"

[sources]
layout = "wrapping"

[dependency]
name = "spdlog"
version = "1.11.0"
resolution = { vendored = "spdlog" }
"#;

/// Stands in for CMake: "compiles" the sources into a library whose file
/// name follows BUILD_SHARED_LIBS in the generated toolchain.
#[derive(Default)]
pub struct FakeTool {
  /// Fail the compile step with this diagnostic.
  pub build_error: Option<String>,
}

impl FakeTool {
  pub fn failing(stderr: &str) -> Self {
    Self {
      build_error: Some(stderr.to_string()),
    }
  }
}

fn io_err(source: std::io::Error) -> ToolError {
  ToolError::Spawn {
    program: "fake".to_string(),
    source,
  }
}

fn library_name(toolchain: &Path) -> Result<&'static str, ToolError> {
  let content = fs::read_to_string(toolchain).map_err(io_err)?;
  if content.contains("set(BUILD_SHARED_LIBS ON") {
    Ok("libslog.so")
  } else {
    Ok("libslog.a")
  }
}

#[async_trait]
impl BuildTool for FakeTool {
  fn name(&self) -> &str {
    "fake"
  }

  async fn configure(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    if !ctx.folders.cmake_source.join("CMakeLists.txt").is_file() {
      return Err(ToolError::Failed {
        cmd: "fake configure".to_string(),
        code: Some(1),
        stdout: String::new(),
        stderr: "The source directory does not contain a CMakeLists.txt file.".to_string(),
      });
    }
    fs::create_dir_all(&ctx.folders.build).map_err(io_err)
  }

  async fn build(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    if let Some(stderr) = &self.build_error {
      return Err(ToolError::Failed {
        cmd: "fake build".to_string(),
        code: Some(2),
        stdout: String::new(),
        stderr: stderr.clone(),
      });
    }

    let mut objects = Vec::new();
    let src = ctx.folders.cmake_source.join("src");
    if src.is_dir() {
      let mut entries: Vec<PathBuf> = fs::read_dir(&src)
        .map_err(io_err)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
      entries.sort();
      for entry in entries {
        objects.extend(fs::read(&entry).map_err(io_err)?);
      }
    }

    let library = library_name(ctx.toolchain)?;
    fs::write(ctx.folders.build.join(library), objects).map_err(io_err)
  }

  async fn install(&self, ctx: &ToolContext<'_>) -> Result<(), ToolError> {
    let library = library_name(ctx.toolchain)?;
    let lib_dir = ctx.folders.package.join("lib");
    fs::create_dir_all(&lib_dir).map_err(io_err)?;
    fs::copy(ctx.folders.build.join(library), lib_dir.join(library)).map_err(io_err)?;
    Ok(())
  }
}

/// A recipe folder plus an isolated cache home.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A flat-layout slog recipe with one header and one source file.
  pub fn flat() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("recipe/recipe.toml", SLOG_RECIPE);
    env.write_file(
      "recipe/CMakeLists.txt",
      "cmake_minimum_required(VERSION 3.15)\nproject(slog CXX)\nadd_library(slog src/a.cpp)\n",
    );
    env.write_file("recipe/include/a.h", "#pragma once\nvoid a();\n");
    env.write_file("recipe/src/a.cpp", "#include \"a.h\"\nvoid a() {}\n");
    env
  }

  /// A wrapping-layout recipe with a vendored spdlog.
  pub fn wrapping() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("recipe/recipe.toml", WRAPPING_RECIPE);
    env.write_file("recipe/wrapping/CMakeLists.txt", "project(slog CXX)\n");
    env.write_file("recipe/wrapping/include/slog/log.h", "#pragma once\n");
    env.write_file("recipe/wrapping/src/log.cpp", "#include \"slog/log.h\"\n");
    env.write_file("recipe/spdlog/include/spdlog/spdlog.h", "#pragma once\n");
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn recipe_dir(&self) -> PathBuf {
    self.temp.path().join("recipe")
  }

  pub fn home(&self) -> PathBuf {
    self.temp.path().join("home")
  }

  /// Create options pinned to a Linux/gcc/x86_64 Release configuration.
  pub fn options(&self, overrides: &[(&str, &str)]) -> CreateOptions {
    CreateOptions {
      profile: Profile {
        settings: linux_settings(),
        options: overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
      },
      home: Some(self.home()),
      host: Some(Os::Linux),
      no_detect: true,
    }
  }
}

pub fn linux_settings() -> SettingsProfile {
  let mut settings = SettingsProfile::default();
  settings.set("os", "Linux").unwrap();
  settings.set("arch", "x86_64").unwrap();
  settings.set("compiler", "gcc").unwrap();
  settings.set("build_type", "Release").unwrap();
  settings
}
