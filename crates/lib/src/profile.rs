//! Profiles: reusable settings and option overrides kept in a TOML file.
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! compiler = "gcc"
//! "compiler.version" = "13"
//!
//! [options]
//! shared = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::SettingsProfile;

#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("failed to read profile {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse profile {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("expected key=value, got '{0}'")]
  Assignment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum OptionValue {
  Bool(bool),
  Text(String),
}

impl OptionValue {
  fn into_string(self) -> String {
    match self {
      Self::Bool(true) => "True".to_string(),
      Self::Bool(false) => "False".to_string(),
      Self::Text(s) => s,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
  #[serde(default)]
  settings: SettingsProfile,
  #[serde(default)]
  options: BTreeMap<String, OptionValue>,
}

/// Settings and option overrides from one configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
  pub settings: SettingsProfile,
  pub options: BTreeMap<String, String>,
}

impl Profile {
  pub fn load(path: &Path) -> Result<Self, ProfileError> {
    let content = fs::read_to_string(path).map_err(|source| ProfileError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let file: ProfileFile = toml::from_str(&content).map_err(|source| ProfileError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self {
      settings: file.settings,
      options: file
        .options
        .into_iter()
        .map(|(name, value)| (name, value.into_string()))
        .collect(),
    })
  }

  /// Overlay `other` on top of this profile; `other` wins.
  pub fn merge(mut self, other: &Profile) -> Self {
    self.settings = self.settings.merge(&other.settings);
    for (name, value) in &other.options {
      self.options.insert(name.clone(), value.clone());
    }
    self
  }
}

/// Split a `key=value` command-line assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, String), ProfileError> {
  match raw.split_once('=') {
    Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.trim().to_string())),
    _ => Err(ProfileError::Assignment(raw.to_string())),
  }
}
