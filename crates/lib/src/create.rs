//! End-to-end package creation: recipe to installed, described package.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::descriptor::{Descriptor, LifecycleError};
use crate::exports::{ExportError, export_sources};
use crate::info::PackageInfo;
use crate::layout::Folders;
use crate::options::BuildOptions;
use crate::platform::os::Os;
use crate::platform::paths::cache_home;
use crate::profile::Profile;
use crate::recipe::{Recipe, RecipeError};
use crate::settings::{BuildSettings, SettingsError, SettingsProfile};
use crate::tool::BuildTool;
use crate::util::hash::{ContentHash, DirHashError, PackageId, hash_directory};

#[derive(Debug, Error)]
pub enum CreateError {
  #[error(transparent)]
  Recipe(#[from] RecipeError),

  #[error("invalid settings: {0}")]
  Settings(#[from] SettingsError),

  #[error(transparent)]
  Export(#[from] ExportError),

  #[error(transparent)]
  Lifecycle(#[from] LifecycleError),

  #[error("failed to hash package folder: {0}")]
  Hash(#[from] DirHashError),
}

/// Inputs for [`create`] beyond the recipe itself.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
  /// Settings and option overrides, layered over detected host settings.
  pub profile: Profile,
  /// Cache root; defaults to [`cache_home`].
  pub home: Option<PathBuf>,
  /// Host OS; defaults to the running system.
  pub host: Option<Os>,
  /// Skip host detection and resolve settings from the profile alone.
  pub no_detect: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
  pub reference: String,
  pub package_id: PackageId,
  pub settings: BuildSettings,
  pub options: BuildOptions,
  pub folders: Folders,
  pub package_info: PackageInfo,
  pub exported: usize,
  pub headers_copied: usize,
  pub headers_unchanged: usize,
  pub content_hash: ContentHash,
  pub duration: Duration,
}

/// Resolve settings for a build: detected host values under the profile.
pub fn resolve_settings(profile: &SettingsProfile, detect: bool) -> Result<BuildSettings, SettingsError> {
  let base = if detect {
    SettingsProfile::detect()
  } else {
    SettingsProfile::default()
  };
  base.merge(profile).resolve()
}

/// Export, configure, build and package the recipe found at `recipe_path`.
pub async fn create<T: BuildTool + ?Sized>(
  recipe_path: &Path,
  options: &CreateOptions,
  tool: &T,
) -> Result<CreateReport, CreateError> {
  let start = Instant::now();

  let (recipe, root) = Recipe::load(recipe_path)?;
  let settings = resolve_settings(&options.profile.settings, !options.no_detect)?;
  let home = options.home.clone().unwrap_or_else(cache_home);

  info!(
    reference = %recipe.reference(),
    settings = %settings,
    home = %home.display(),
    "creating package"
  );

  let mut descriptor = Descriptor::new(&recipe, settings.clone(), &home).with_host(options.host.or(Os::current()));

  let configured = descriptor.config_options(&options.profile.options)?;
  let folders = descriptor.layout()?;

  let exported = export_sources(&root, &recipe.exports(), &folders.source)?;
  if exported.files.is_empty() {
    warn!(root = %root.display(), "no source files exported");
  }

  descriptor.generate()?;
  descriptor.build(tool).await?;
  let packaged = descriptor.package(tool).await?;
  let package_info = descriptor.package_info()?.clone();

  let content_hash = hash_directory(&folders.package, &[])?;
  info!(
    package_id = %configured.package_id,
    hash = %content_hash,
    package = %folders.package.display(),
    "package created"
  );

  Ok(CreateReport {
    reference: recipe.reference(),
    package_id: configured.package_id,
    settings,
    options: configured.options,
    folders,
    package_info,
    exported: exported.files.len(),
    headers_copied: packaged.headers.copied.len() + packaged.headers.overwritten.len(),
    headers_unchanged: packaged.headers.unchanged.len(),
    content_hash,
    duration: start.elapsed(),
  })
}
