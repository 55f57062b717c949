//! Subprocess execution for build tools.

use std::ffi::OsString;
use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::tool::ToolError;

/// Captured output of a successful tool run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
  pub stdout: String,
  pub stderr: String,
}

/// Run `program` with `args` in `cwd` and wait for it.
///
/// The environment is inherited so compilers on `PATH` stay visible.
/// `SOURCE_DATE_EPOCH` is pinned to 315532800 (1980-01-01, the ZIP epoch) so
/// tools that embed timestamps produce reproducible artifacts. On failure
/// both output streams are returned unmodified, since some compilers (MSVC)
/// report diagnostics on stdout.
pub async fn run_tool(program: &Path, args: &[OsString], cwd: &Path) -> Result<ToolOutput, ToolError> {
  let cmd_line = command_line(program, args);
  info!(cmd = %cmd_line, "running tool");

  tokio::fs::create_dir_all(cwd).await.map_err(|source| ToolError::Spawn {
    program: program.display().to_string(),
    source,
  })?;

  let output = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .env("SOURCE_DATE_EPOCH", "315532800")
    .output()
    .await
    .map_err(|source| ToolError::Spawn {
      program: program.display().to_string(),
      source,
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
  let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim_end(), "tool stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim_end(), "tool stderr");
  }

  if !output.status.success() {
    return Err(ToolError::Failed {
      cmd: cmd_line,
      code: output.status.code(),
      stdout,
      stderr,
    });
  }

  Ok(ToolOutput { stdout, stderr })
}

fn command_line(program: &Path, args: &[OsString]) -> String {
  let mut parts = vec![program.display().to_string()];
  parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
  parts.join(" ")
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn sh(script: &str) -> Vec<OsString> {
    vec![OsString::from("-c"), OsString::from(script)]
  }

  #[tokio::test]
  async fn captures_stdout() {
    let temp = TempDir::new().unwrap();
    let output = run_tool(Path::new("/bin/sh"), &sh("echo hello"), temp.path()).await.unwrap();
    assert_eq!(output.stdout.trim(), "hello");
  }

  #[tokio::test]
  async fn pins_source_date_epoch() {
    let temp = TempDir::new().unwrap();
    let output = run_tool(Path::new("/bin/sh"), &sh("echo $SOURCE_DATE_EPOCH"), temp.path())
      .await
      .unwrap();
    assert_eq!(output.stdout.trim(), "315532800");
  }

  #[tokio::test]
  async fn failure_keeps_stderr_verbatim() {
    let temp = TempDir::new().unwrap();
    let err = run_tool(
      Path::new("/bin/sh"),
      &sh("echo 'slog.cpp:3: error: expected ;' >&2; exit 2"),
      temp.path(),
    )
    .await
    .unwrap_err();

    match err {
      ToolError::Failed { code, stdout, stderr, .. } => {
        assert_eq!(code, Some(2));
        assert!(stdout.is_empty());
        assert_eq!(stderr, "slog.cpp:3: error: expected ;\n");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[tokio::test]
  async fn failure_keeps_stdout_diagnostics() {
    let temp = TempDir::new().unwrap();
    let err = run_tool(
      Path::new("/bin/sh"),
      &sh("printf 'slog.cpp(3): error C%s: syntax error\\n' 2143; exit 2"),
      temp.path(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("slog.cpp(3): error C2143: syntax error"));
    match err {
      ToolError::Failed { stdout, stderr, .. } => {
        assert_eq!(stdout, "slog.cpp(3): error C2143: syntax error\n");
        assert!(stderr.is_empty());
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[tokio::test]
  async fn runs_in_requested_directory() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("build");

    run_tool(Path::new("/bin/sh"), &sh("touch marker"), &cwd).await.unwrap();

    assert!(cwd.join("marker").exists());
  }

  #[tokio::test]
  async fn missing_program_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    let err = run_tool(Path::new("/nonexistent/cmake"), &[], temp.path()).await.unwrap_err();
    assert!(matches!(err, ToolError::Spawn { .. }));
  }
}
