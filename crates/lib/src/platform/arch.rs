use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CPU architecture values accepted for the `arch` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arch {
  #[serde(rename = "x86")]
  X86,
  #[serde(rename = "x86_64")]
  X86_64,
  #[serde(rename = "armv7")]
  Armv7,
  #[serde(rename = "armv8", alias = "aarch64")]
  Armv8,
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::X86_64),
      "arm" => Some(Self::Armv7),
      "aarch64" => Some(Self::Armv8),
      _ => None,
    }
  }

  /// Returns the setting value for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Armv7 => "armv7",
      Self::Armv8 => "armv8",
    }
  }

  pub fn is_64bit(&self) -> bool {
    matches!(self, Self::X86_64 | Self::Armv8)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "x86" | "i686" => Ok(Self::X86),
      "x86_64" | "amd64" => Ok(Self::X86_64),
      "armv7" => Ok(Self::Armv7),
      "armv8" | "aarch64" | "arm64" => Ok(Self::Armv8),
      _ => Err(format!("unknown arch '{}' (expected x86, x86_64, armv7 or armv8)", s)),
    }
  }
}
