//! Implementation of the `pkgdesc create` command.
//!
//! Layers settings (detected host, profile file, command line), then runs
//! the full export, build and package flow with CMake.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use pkgdesc_lib::create::{CreateOptions, CreateReport, create};
use pkgdesc_lib::profile::{Profile, parse_assignment};
use pkgdesc_lib::tool::CMake;

use crate::output::{
  OutputFormat, format_duration, format_headers, format_list, print_json, print_section, print_stat, print_success,
  truncate_hash,
};

pub struct CreateArgs {
  pub dir: PathBuf,
  pub profile: Option<PathBuf>,
  pub settings: Vec<String>,
  pub options: Vec<String>,
  pub generator: Option<String>,
  pub jobs: Option<usize>,
  pub output: OutputFormat,
}

/// Build the profile from an optional file plus `-s`/`-o` assignments.
/// Command-line values win over the file.
fn layered_profile(args: &CreateArgs) -> Result<Profile> {
  let base = match &args.profile {
    Some(path) => Profile::load(path).with_context(|| format!("Failed to load profile {}", path.display()))?,
    None => Profile::default(),
  };

  let mut overrides = Profile::default();
  for raw in &args.settings {
    let (key, value) = parse_assignment(raw)?;
    overrides
      .settings
      .set(&key, &value)
      .with_context(|| format!("Invalid setting '{}'", raw))?;
  }
  for raw in &args.options {
    let (name, value) = parse_assignment(raw)?;
    overrides.options.insert(name, value);
  }

  let profile = base.merge(&overrides);
  debug!(?profile, "layered profile");
  Ok(profile)
}

pub fn cmd_create(args: &CreateArgs) -> Result<()> {
  let profile = layered_profile(args)?;

  let mut tool = CMake::locate().context("Failed to locate cmake")?;
  if let Some(generator) = &args.generator {
    tool = tool.with_generator(generator);
  }
  if let Some(jobs) = args.jobs {
    tool = tool.with_jobs(jobs);
  }

  let options = CreateOptions {
    profile,
    ..Default::default()
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(create(&args.dir, &options, &tool))
    .context("Create failed")?;

  if args.output.is_json() {
    print_json(&report)?;
  } else {
    print_report(&report);
  }

  Ok(())
}

fn print_report(report: &CreateReport) {
  println!();
  print_success(&format!("Created {}", report.reference));
  print_stat("Package id", &report.package_id.0);
  print_stat("Settings", &report.settings.to_string());
  print_stat("Options", &report.options.to_string());

  print_section("Package:");
  print_stat("Folder", &report.folders.package.display().to_string());
  print_stat("Libraries", &format_list(&report.package_info.libs));
  print_stat("Include dirs", &format_list(&report.package_info.includedirs));
  print_stat("Exported files", &report.exported.to_string());
  print_stat("Headers", &format_headers(report.headers_copied, report.headers_unchanged));
  print_stat("Content hash", truncate_hash(&report.content_hash.0));
  print_stat("Duration", &format_duration(report.duration));
}

#[cfg(test)]
mod tests {
  use super::*;
  use pkgdesc_lib::platform::os::Os;
  use pkgdesc_lib::settings::BuildType;
  use std::fs;
  use tempfile::TempDir;

  fn args(profile: Option<PathBuf>, settings: &[&str], options: &[&str]) -> CreateArgs {
    CreateArgs {
      dir: PathBuf::from("."),
      profile,
      settings: settings.iter().map(|s| s.to_string()).collect(),
      options: options.iter().map(|s| s.to_string()).collect(),
      generator: None,
      jobs: None,
      output: OutputFormat::Text,
    }
  }

  #[test]
  fn command_line_overrides_profile_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("linux.toml");
    fs::write(
      &path,
      "[settings]\nos = \"Linux\"\nbuild_type = \"Debug\"\n\n[options]\nshared = true\n",
    )
    .unwrap();

    let profile = layered_profile(&args(Some(path), &["build_type=Release"], &["shared=False"])).unwrap();

    assert_eq!(profile.settings.build_type, Some(BuildType::Release));
    assert_eq!(profile.settings.os, Some(Os::Linux));
    assert_eq!(profile.options.get("shared").map(String::as_str), Some("False"));
  }

  #[test]
  fn malformed_assignment_is_rejected() {
    assert!(layered_profile(&args(None, &["os"], &[])).is_err());
    assert!(layered_profile(&args(None, &["planet=Mars"], &[])).is_err());
  }
}
