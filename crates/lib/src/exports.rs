//! Source export: the snapshot of recipe files used for out-of-source builds.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::util::fs::{CopyError, copy_matching, relative_key, reset_dir};
use crate::util::glob::{GlobError, compile_all};

#[derive(Debug, Error)]
pub enum ExportError {
  #[error(transparent)]
  Pattern(#[from] GlobError),

  #[error(transparent)]
  Copy(#[from] CopyError),

  #[error("export destination {} must not contain the recipe folder", dest.display())]
  DestinationContainsRecipe { dest: PathBuf },
}

/// Files captured into a source snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
  /// Exported files relative to the snapshot root, in walk order.
  pub files: Vec<PathBuf>,
  /// Patterns that matched no file.
  pub unmatched: Vec<String>,
}

/// Snapshot `recipe_root` into `dest`, keeping only files matched by `patterns`.
///
/// `dest` is emptied first so the snapshot never carries stale files. A
/// pattern that matches nothing is reported and logged, not treated as an
/// error.
pub fn export_sources(recipe_root: &Path, patterns: &[String], dest: &Path) -> Result<ExportReport, ExportError> {
  let compiled = compile_all(patterns)?;

  if recipe_root.starts_with(dest) {
    return Err(ExportError::DestinationContainsRecipe {
      dest: dest.to_path_buf(),
    });
  }

  reset_dir(dest)?;
  let copied = copy_matching(recipe_root, dest, &compiled)?;
  let files: Vec<PathBuf> = copied.placed().cloned().collect();

  let unmatched: Vec<String> = compiled
    .iter()
    .filter(|pattern| !files.iter().any(|f| pattern.matches(&relative_key(f))))
    .map(|pattern| pattern.as_str().to_string())
    .collect();

  for pattern in &unmatched {
    warn!(%pattern, "export pattern matched no files");
  }

  info!(count = files.len(), dest = %dest.display(), "exported sources");

  Ok(ExportReport { files, unmatched })
}
