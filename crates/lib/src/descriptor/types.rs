use std::fmt;

use thiserror::Error;

use crate::generate::GenerateError;
use crate::info::InfoError;
use crate::options::OptionsError;
use crate::package::PackageError;
use crate::tool::ToolError;

/// Where a descriptor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Instantiated,
  OptionsConfigured,
  LaidOut,
  Generated,
  Built,
  Packaged,
  /// `package_info` has been computed; nothing else may run.
  Finished,
  /// A step failed; every later call is aborted.
  Failed,
}

/// A lifecycle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  ConfigOptions,
  Layout,
  Generate,
  Build,
  Package,
  PackageInfo,
}

impl Step {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::ConfigOptions => "config_options",
      Self::Layout => "layout",
      Self::Generate => "generate",
      Self::Build => "build",
      Self::Package => "package",
      Self::PackageInfo => "package_info",
    }
  }

  /// The stage the descriptor must be in for this step to run.
  pub(crate) fn requires(&self) -> Stage {
    match self {
      Self::ConfigOptions => Stage::Instantiated,
      Self::Layout => Stage::OptionsConfigured,
      Self::Generate => Stage::LaidOut,
      Self::Build => Stage::Generated,
      Self::Package => Stage::Built,
      Self::PackageInfo => Stage::Packaged,
    }
  }

  /// The stage reached when this step succeeds.
  pub(crate) fn reaches(&self) -> Stage {
    match self {
      Self::ConfigOptions => Stage::OptionsConfigured,
      Self::Layout => Stage::LaidOut,
      Self::Generate => Stage::Generated,
      Self::Build => Stage::Built,
      Self::Package => Stage::Packaged,
      Self::PackageInfo => Stage::Finished,
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
  #[error("{step} called out of order: descriptor is at {stage:?}, expected {expected:?}")]
  OutOfOrder { step: Step, stage: Stage, expected: Stage },

  #[error("{step} not run: an earlier step failed")]
  Aborted { step: Step },

  #[error(transparent)]
  Options(#[from] OptionsError),

  #[error("failed to compute package id: {0}")]
  PackageId(#[from] serde_json::Error),

  #[error(transparent)]
  Generate(#[from] GenerateError),

  #[error(transparent)]
  Build(#[from] ToolError),

  #[error(transparent)]
  Package(#[from] PackageError),

  #[error(transparent)]
  Info(#[from] InfoError),
}
