//! Terminal rendering for pkgdesc commands.
//!
//! Text mode prints status lines and indented `label: value` rows grouped
//! under section headers; JSON mode prints the serialized report alone so it
//! can be piped.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Success,
  Error,
  Warning,
  Info,
}

impl Status {
  pub fn symbol(self) -> &'static str {
    match self {
      Status::Success => "✓",
      Status::Error => "✗",
      Status::Warning => "⚠",
      Status::Info => "•",
    }
  }
}

fn print_status(status: Status, message: &str) {
  let symbol = status.symbol();
  match status {
    Status::Success => println!("{} {}", symbol.if_supports_color(Stream::Stdout, |s| s.green()), message),
    Status::Info => println!("{} {}", symbol.if_supports_color(Stream::Stdout, |s| s.blue()), message),
    Status::Error => eprintln!(
      "{} {}",
      symbol.if_supports_color(Stream::Stderr, |s| s.red()),
      message.if_supports_color(Stream::Stderr, |s| s.red())
    ),
    Status::Warning => eprintln!(
      "{} {}",
      symbol.if_supports_color(Stream::Stderr, |s| s.yellow()),
      message.if_supports_color(Stream::Stderr, |s| s.yellow())
    ),
  }
}

pub fn print_success(message: &str) {
  print_status(Status::Success, message);
}

pub fn print_error(message: &str) {
  print_status(Status::Error, message);
}

pub fn print_warning(message: &str) {
  print_status(Status::Warning, message);
}

pub fn print_info(message: &str) {
  print_status(Status::Info, message);
}

/// Blank line, then a bold section title.
pub fn print_section(title: &str) {
  println!();
  println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Comma-separated items, or `-` when there are none.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
  if items.is_empty() {
    return "-".to_string();
  }
  items.iter().map(|item| item.as_ref()).collect::<Vec<&str>>().join(", ")
}

/// Header overlay summary for the create report.
pub fn format_headers(copied: usize, unchanged: usize) -> String {
  format!("{} copied, {} unchanged", copied, unchanged)
}

/// First 12 characters of a hex digest.
pub fn truncate_hash(hash: &str) -> &str {
  hash.get(..12).unwrap_or(hash)
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{:.2}s", duration.as_secs_f64())
  } else {
    format!("{}ms", duration.subsec_millis())
  }
}
