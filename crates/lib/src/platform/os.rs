use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system values accepted for the `os` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Os {
  #[serde(rename = "Linux", alias = "linux")]
  Linux,
  #[serde(rename = "Macos", alias = "macos", alias = "darwin")]
  Macos,
  #[serde(rename = "Windows", alias = "windows")]
  Windows,
  #[serde(rename = "FreeBSD", alias = "freebsd")]
  FreeBsd,
}

impl Os {
  pub const ALL: [Os; 4] = [Os::Linux, Os::Macos, Os::Windows, Os::FreeBsd];

  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Macos),
      "windows" => Some(Self::Windows),
      "freebsd" => Some(Self::FreeBsd),
      _ => None,
    }
  }

  /// Returns the setting value for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::Macos => "Macos",
      Self::Windows => "Windows",
      Self::FreeBsd => "FreeBSD",
    }
  }

  /// Position-independent code has no meaning on Windows targets
  pub fn supports_fpic(&self) -> bool {
    !matches!(self, Self::Windows)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Os {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "linux" => Ok(Self::Linux),
      "macos" | "darwin" => Ok(Self::Macos),
      "windows" => Ok(Self::Windows),
      "freebsd" => Ok(Self::FreeBsd),
      _ => Err(format!("unknown os '{}' (expected Linux, Macos, Windows or FreeBSD)", s)),
    }
  }
}
