//! Pattern-driven file copying shared by source export and header overlay.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::util::glob::Pattern;
use crate::util::hash::{DirHashError, hash_file};

#[derive(Debug, Error)]
pub enum CopyError {
  #[error("failed to walk {}: {message}", root.display())]
  Walk { root: PathBuf, message: String },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Hash(#[from] DirHashError),
}

/// Outcome of a pattern copy. Paths are relative to the destination root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
  /// Files that did not exist at the destination.
  pub copied: Vec<PathBuf>,
  /// Files that existed with different content and were replaced.
  pub overwritten: Vec<PathBuf>,
  /// Files that already existed with identical content.
  pub unchanged: Vec<PathBuf>,
}

impl CopyReport {
  /// Every file now present at the destination because of this copy.
  pub fn placed(&self) -> impl Iterator<Item = &PathBuf> {
    self.copied.iter().chain(&self.overwritten).chain(&self.unchanged)
  }

  pub fn total(&self) -> usize {
    self.copied.len() + self.overwritten.len() + self.unchanged.len()
  }
}

/// Copy every file under `src` whose relative path matches one of `patterns`
/// into `dst`, keeping relative paths.
///
/// A missing `src` is not an error; it yields an empty report. Identical
/// files already at the destination are left alone, so repeated copies are
/// no-ops.
pub fn copy_matching(src: &Path, dst: &Path, patterns: &[Pattern]) -> Result<CopyReport, CopyError> {
  let mut report = CopyReport::default();

  if !src.is_dir() {
    debug!(src = %src.display(), "copy source does not exist");
    return Ok(report);
  }

  // Collect before copying so a destination nested under `src` is never walked
  let mut matched = Vec::new();
  for entry in WalkDir::new(src).sort_by_file_name() {
    let entry = entry.map_err(|e| CopyError::Walk {
      root: src.to_path_buf(),
      message: e.to_string(),
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let Ok(relative) = entry.path().strip_prefix(src) else {
      continue;
    };

    if patterns.iter().any(|p| p.matches(&relative_key(relative))) {
      matched.push((entry.path().to_path_buf(), relative.to_path_buf()));
    }
  }

  for (source, relative) in matched {
    let target = dst.join(&relative);
    if target.is_file() {
      if hash_file(&target)? == hash_file(&source)? {
        report.unchanged.push(relative);
        continue;
      }
      warn!(file = %relative_key(&relative), "replacing file with different content");
      copy_file(&source, &target)?;
      report.overwritten.push(relative);
    } else {
      copy_file(&source, &target)?;
      report.copied.push(relative);
    }
  }

  Ok(report)
}

/// `/`-separated form of a relative path, used for pattern matching.
pub fn relative_key(relative: &Path) -> String {
  relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

/// Remove a directory tree if it exists and recreate it empty.
pub fn reset_dir(path: &Path) -> Result<(), CopyError> {
  if path.exists() {
    fs::remove_dir_all(path).map_err(|source| CopyError::CreateDir {
      path: path.to_path_buf(),
      source,
    })?;
  }
  fs::create_dir_all(path).map_err(|source| CopyError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}

fn copy_file(from: &Path, to: &Path) -> Result<(), CopyError> {
  if let Some(parent) = to.parent() {
    fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }
  fs::copy(from, to).map_err(|source| CopyError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::glob::compile_all;
  use tempfile::tempdir;

  fn headers() -> Vec<Pattern> {
    compile_all(&["*.h", "*.hpp"]).unwrap()
  }

  #[test]
  fn copies_matching_files_with_subdirectories() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::create_dir_all(src.path().join("detail")).unwrap();
    fs::write(src.path().join("a.h"), "a").unwrap();
    fs::write(src.path().join("detail/b.hpp"), "b").unwrap();
    fs::write(src.path().join("a.cpp"), "impl").unwrap();

    let report = copy_matching(src.path(), dst.path(), &headers()).unwrap();

    assert_eq!(report.copied.len(), 2);
    assert!(dst.path().join("a.h").exists());
    assert!(dst.path().join("detail/b.hpp").exists());
    assert!(!dst.path().join("a.cpp").exists());
  }

  #[test]
  fn second_copy_is_a_no_op() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("a.h"), "a").unwrap();

    copy_matching(src.path(), dst.path(), &headers()).unwrap();
    let report = copy_matching(src.path(), dst.path(), &headers()).unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.unchanged, vec![PathBuf::from("a.h")]);
  }

  #[test]
  fn differing_destination_is_overwritten() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("a.h"), "fresh").unwrap();
    fs::write(dst.path().join("a.h"), "stale").unwrap();

    let report = copy_matching(src.path(), dst.path(), &headers()).unwrap();

    assert_eq!(report.overwritten, vec![PathBuf::from("a.h")]);
    assert_eq!(fs::read_to_string(dst.path().join("a.h")).unwrap(), "fresh");
  }

  #[test]
  fn missing_source_yields_empty_report() {
    let dst = tempdir().unwrap();
    let report = copy_matching(&dst.path().join("nope"), dst.path(), &headers()).unwrap();
    assert_eq!(report.total(), 0);
  }

  #[test]
  fn reset_dir_empties_existing_tree() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("pkg");
    fs::create_dir_all(dir.join("lib")).unwrap();
    fs::write(dir.join("lib/old.a"), "old").unwrap();

    reset_dir(&dir).unwrap();

    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
  }
}
