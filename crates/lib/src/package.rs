//! The `package` step: install, then overlay headers.
//!
//! The install target decides what lands in the package, except for
//! headers: every `*.h` / `*.hpp` under the source header folder is copied
//! into `<package>/include` afterwards. That overlay is the authoritative
//! header placement. It is idempotent, and when it has to replace a header
//! the install put there with different content, it says so in the log.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::consts::HEADER_PATTERNS;
use crate::tool::{BuildTool, ToolContext, ToolError};
use crate::util::fs::{CopyError, CopyReport, copy_matching, reset_dir};
use crate::util::glob::{GlobError, compile_all};

#[derive(Debug, Error)]
pub enum PackageError {
  #[error(transparent)]
  Tool(#[from] ToolError),

  #[error(transparent)]
  Copy(#[from] CopyError),

  #[error(transparent)]
  Pattern(#[from] GlobError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageReport {
  pub package_folder: PathBuf,
  pub headers: CopyReport,
}

/// Install into a clean package folder, then overlay headers.
pub async fn package<T: BuildTool + ?Sized>(tool: &T, ctx: &ToolContext<'_>) -> Result<PackageReport, PackageError> {
  let package_folder = &ctx.folders.package;

  reset_dir(package_folder)?;
  tool.install(ctx).await?;

  let headers = overlay_headers(&ctx.folders.headers, &package_folder.join("include"))?;

  info!(
    package = %package_folder.display(),
    headers = headers.total(),
    "packaged"
  );

  Ok(PackageReport {
    package_folder: package_folder.clone(),
    headers,
  })
}

/// Copy `*.h` and `*.hpp` from `src` into `dst`, keeping subfolders.
///
/// A missing or header-less `src` succeeds with an empty report.
pub fn overlay_headers(src: &Path, dst: &Path) -> Result<CopyReport, PackageError> {
  let patterns = compile_all(HEADER_PATTERNS)?;
  let report = copy_matching(src, dst, &patterns)?;

  if report.total() == 0 {
    warn!(src = %src.display(), "no headers to package");
  }

  Ok(report)
}
