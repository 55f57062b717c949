//! Binary options: `shared` and `fPIC`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::platform::os::Os;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
  #[error("unknown option '{0}' (expected shared or fPIC)")]
  Unknown(String),

  #[error("invalid value '{value}' for option '{name}': expected True or False")]
  InvalidValue { name: String, value: String },
}

/// Option defaults declared by a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDefaults {
  #[serde(default)]
  pub shared: bool,
  #[serde(default = "default_fpic", rename = "fPIC", alias = "fpic")]
  pub fpic: bool,
}

fn default_fpic() -> bool {
  true
}

impl Default for OptionDefaults {
  fn default() -> Self {
    Self {
      shared: false,
      fpic: default_fpic(),
    }
  }
}

/// The effective option set for one build.
///
/// `fpic` is `None` when the option was removed from the set, which is
/// different from `Some(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildOptions {
  pub shared: bool,
  #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
  pub fpic: Option<bool>,
}

impl BuildOptions {
  /// Whether the fPIC option is part of this option set at all.
  pub fn has_fpic(&self) -> bool {
    self.fpic.is_some()
  }

  /// Apply a single `name=value` override.
  ///
  /// Overriding an option that `config_options` removed is ignored.
  pub fn apply_override(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
    let parsed = parse_bool(value).ok_or_else(|| OptionsError::InvalidValue {
      name: name.to_string(),
      value: value.to_string(),
    })?;

    match name {
      "shared" => self.shared = parsed,
      "fPIC" | "fpic" => match self.fpic {
        Some(_) => self.fpic = Some(parsed),
        None => debug!(value = parsed, "ignoring override for removed option fPIC"),
      },
      other => return Err(OptionsError::Unknown(other.to_string())),
    }

    Ok(())
  }

  /// Apply a set of overrides in key order.
  pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<(), OptionsError> {
    for (name, value) in overrides {
      self.apply_override(name, value)?;
    }
    Ok(())
  }
}

impl fmt::Display for BuildOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "shared={}", bool_str(self.shared))?;
    if let Some(fpic) = self.fpic {
      write!(f, ", fPIC={}", bool_str(fpic))?;
    }
    Ok(())
  }
}

/// Build the option set for the target OS.
///
/// fPIC is removed entirely on Windows.
pub fn config_options(defaults: &OptionDefaults, os: Os) -> BuildOptions {
  let fpic = if os.supports_fpic() {
    Some(defaults.fpic)
  } else {
    debug!(%os, "removing fPIC option");
    None
  };

  BuildOptions {
    shared: defaults.shared,
    fpic,
  }
}

fn bool_str(value: bool) -> &'static str {
  if value { "True" } else { "False" }
}

fn parse_bool(value: &str) -> Option<bool> {
  match value.to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" | "on" => Some(true),
    "false" | "0" | "no" | "off" => Some(false),
    _ => None,
  }
}
