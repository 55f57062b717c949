use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::platform::arch::Arch;
use crate::platform::os::Os;

/// Compiler family for the `compiler` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilerKind {
  #[serde(rename = "gcc")]
  Gcc,
  #[serde(rename = "clang")]
  Clang,
  #[serde(rename = "apple-clang")]
  AppleClang,
  #[serde(rename = "msvc")]
  Msvc,
}

impl CompilerKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::AppleClang => "apple-clang",
      Self::Msvc => "msvc",
    }
  }

  /// (C compiler, C++ compiler) executables handed to CMake
  pub fn executables(&self) -> (&'static str, &'static str) {
    match self {
      Self::Gcc => ("gcc", "g++"),
      Self::Clang | Self::AppleClang => ("clang", "clang++"),
      Self::Msvc => ("cl", "cl"),
    }
  }
}

impl fmt::Display for CompilerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for CompilerKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "gcc" => Ok(Self::Gcc),
      "clang" => Ok(Self::Clang),
      "apple-clang" => Ok(Self::AppleClang),
      "msvc" | "visual studio" => Ok(Self::Msvc),
      _ => Err(format!(
        "unknown compiler '{}' (expected gcc, clang, apple-clang or msvc)",
        s
      )),
    }
  }
}

/// A compiler family plus optional version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
  pub kind: CompilerKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.version {
      Some(version) => write!(f, "{} {}", self.kind, version),
      None => write!(f, "{}", self.kind),
    }
  }
}

/// CMake build type for the `build_type` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
  Debug,
  #[default]
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl BuildType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for BuildType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "debug" => Ok(Self::Debug),
      "release" => Ok(Self::Release),
      "relwithdebinfo" => Ok(Self::RelWithDebInfo),
      "minsizerel" => Ok(Self::MinSizeRel),
      _ => Err(format!(
        "unknown build_type '{}' (expected Debug, Release, RelWithDebInfo or MinSizeRel)",
        s
      )),
    }
  }
}

/// Fully resolved settings for one build invocation.
///
/// The values come from the invoking environment; the descriptor only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildSettings {
  pub os: Os,
  pub compiler: Compiler,
  pub build_type: BuildType,
  pub arch: Arch,
}

impl BuildSettings {
  /// Multi-config toolchains select the build type at build time, not configure time
  pub fn is_multi_config(&self) -> bool {
    matches!(self.compiler.kind, CompilerKind::Msvc)
  }
}

impl fmt::Display for BuildSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "os={} arch={} compiler={} build_type={}",
      self.os, self.arch, self.compiler, self.build_type
    )
  }
}
