//! fnmatch-style path patterns.
//!
//! Patterns are matched against `/`-separated paths relative to a root.
//! `*` matches any run of characters including `/`, `?` matches a single
//! character and `[...]` (or `[!...]`) matches a character class.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {message}")]
pub struct GlobError {
  pub pattern: String,
  pub message: String,
}

#[derive(Debug, Clone)]
pub struct Pattern {
  source: String,
  regex: Regex,
}

impl Pattern {
  pub fn new(pattern: &str) -> Result<Self, GlobError> {
    let regex = Regex::new(&translate(pattern)).map_err(|e| GlobError {
      pattern: pattern.to_string(),
      message: e.to_string(),
    })?;

    Ok(Self {
      source: pattern.to_string(),
      regex,
    })
  }

  pub fn as_str(&self) -> &str {
    &self.source
  }

  pub fn matches(&self, path: &str) -> bool {
    self.regex.is_match(path)
  }
}

/// Compile a list of patterns, failing on the first invalid one.
pub fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, GlobError> {
  patterns.iter().map(|p| Pattern::new(p.as_ref())).collect()
}

fn translate(pattern: &str) -> String {
  let mut out = String::from("^");
  let mut chars = pattern.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '*' => out.push_str(".*"),
      '?' => out.push('.'),
      '[' => {
        let mut class = String::new();
        let mut closed = false;
        if chars.peek() == Some(&'!') {
          chars.next();
          class.push('^');
        }
        for c in chars.by_ref() {
          if c == ']' {
            closed = true;
            break;
          }
          if c == '\\' || c == '[' {
            class.push('\\');
          }
          class.push(c);
        }
        if closed {
          out.push('[');
          out.push_str(&class);
          out.push(']');
        } else {
          // Unterminated class is a literal bracket
          out.push_str(&regex::escape("["));
          out.push_str(&regex::escape(class.trim_start_matches('^')));
        }
      }
      other => out.push_str(&regex::escape(&other.to_string())),
    }
  }

  out.push('$');
  out
}
