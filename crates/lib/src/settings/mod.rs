//! Build settings: the os/compiler/build_type/arch axes.
//!
//! Settings are supplied by the invoking environment in layers. A
//! [`SettingsProfile`] holds a partial set of values; profiles merge with
//! later layers winning and then resolve into complete [`BuildSettings`].
//! Resolution fails when an axis is missing, and [`BuildSettings::validate`]
//! rejects combinations no toolchain can satisfy.

mod types;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::platform::arch::Arch;
use crate::platform::os::Os;

pub use types::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
  #[error("setting '{0}' is not defined")]
  Missing(&'static str),

  #[error("unknown setting '{0}' (expected os, compiler, compiler.version, build_type or arch)")]
  UnknownKey(String),

  #[error("invalid value for setting '{key}': {message}")]
  InvalidValue { key: String, message: String },

  #[error("unsupported settings combination: {0}")]
  Unsupported(String),
}

/// A partial set of settings, as supplied by one configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsProfile {
  #[serde(default)]
  pub os: Option<Os>,
  #[serde(default)]
  pub compiler: Option<CompilerKind>,
  #[serde(default, rename = "compiler.version", alias = "compiler_version")]
  pub compiler_version: Option<String>,
  #[serde(default)]
  pub build_type: Option<BuildType>,
  #[serde(default)]
  pub arch: Option<Arch>,
}

impl SettingsProfile {
  /// Detect settings from the host.
  ///
  /// The compiler is inferred from the OS and from what is on `PATH`; it is
  /// left unset when nothing suitable is found.
  pub fn detect() -> Self {
    let os = Os::current();
    let compiler = match os {
      Some(Os::Windows) => Some(CompilerKind::Msvc),
      Some(Os::Macos) => Some(CompilerKind::AppleClang),
      _ => {
        if which::which("gcc").is_ok() {
          Some(CompilerKind::Gcc)
        } else if which::which("clang").is_ok() {
          Some(CompilerKind::Clang)
        } else {
          None
        }
      }
    };

    debug!(?os, ?compiler, "detected host settings");

    Self {
      os,
      compiler,
      compiler_version: None,
      build_type: Some(BuildType::default()),
      arch: Arch::current(),
    }
  }

  /// Set a single axis from a `key=value` style pair.
  pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
    let invalid = |message: String| SettingsError::InvalidValue {
      key: key.to_string(),
      message,
    };

    match key {
      "os" => self.os = Some(value.parse().map_err(invalid)?),
      "compiler" => self.compiler = Some(value.parse().map_err(invalid)?),
      "compiler.version" => self.compiler_version = Some(value.to_string()),
      "build_type" => self.build_type = Some(value.parse().map_err(invalid)?),
      "arch" => self.arch = Some(value.parse().map_err(invalid)?),
      other => return Err(SettingsError::UnknownKey(other.to_string())),
    }

    Ok(())
  }

  /// Overlay `other` on top of `self`; values set in `other` win.
  pub fn merge(mut self, other: &SettingsProfile) -> Self {
    if other.compiler.is_some() && other.compiler != self.compiler {
      // A version only makes sense for the compiler it was given with
      self.compiler_version = None;
    }
    self.os = other.os.or(self.os);
    self.compiler = other.compiler.or(self.compiler);
    self.compiler_version = other.compiler_version.clone().or(self.compiler_version);
    self.build_type = other.build_type.or(self.build_type);
    self.arch = other.arch.or(self.arch);
    self
  }

  /// Resolve into complete settings. Every axis must be present.
  pub fn resolve(&self) -> Result<BuildSettings, SettingsError> {
    Ok(BuildSettings {
      os: self.os.ok_or(SettingsError::Missing("os"))?,
      compiler: Compiler {
        kind: self.compiler.ok_or(SettingsError::Missing("compiler"))?,
        version: self.compiler_version.clone(),
      },
      build_type: self.build_type.ok_or(SettingsError::Missing("build_type"))?,
      arch: self.arch.ok_or(SettingsError::Missing("arch"))?,
    })
  }
}

impl BuildSettings {
  /// Reject combinations that no toolchain supports.
  pub fn validate(&self) -> Result<(), SettingsError> {
    match (self.compiler.kind, self.os) {
      (CompilerKind::Msvc, os) if os != Os::Windows => {
        return Err(SettingsError::Unsupported(format!("msvc cannot target {}", os)));
      }
      (CompilerKind::AppleClang, os) if os != Os::Macos => {
        return Err(SettingsError::Unsupported(format!("apple-clang cannot target {}", os)));
      }
      _ => {}
    }

    if self.os == Os::Macos && matches!(self.arch, Arch::X86 | Arch::Armv7) {
      return Err(SettingsError::Unsupported(format!("Macos does not support {}", self.arch)));
    }

    if self.compiler.kind == CompilerKind::Msvc && self.arch == Arch::Armv7 {
      return Err(SettingsError::Unsupported("msvc does not support armv7".to_string()));
    }

    Ok(())
  }
}
