//! Implementation of the `pkgdesc inspect` command.

use std::path::Path;

use anyhow::{Context, Result};

use pkgdesc_lib::deps::Resolution;
use pkgdesc_lib::recipe::Recipe;

use crate::output::{OutputFormat, format_list, print_info, print_json, print_section, print_stat};

pub fn cmd_inspect(dir: &Path, output: OutputFormat) -> Result<()> {
  let (recipe, root) = Recipe::load(dir).context("Failed to load recipe")?;
  let package_info = recipe.package_info();

  if output.is_json() {
    let json_output = serde_json::json!({
      "reference": recipe.reference(),
      "root": root,
      "package": &recipe.package,
      "options": recipe.options,
      "layout": recipe.layout().as_str(),
      "exports": recipe.exports(),
      "dependency": &recipe.dependency,
      "package_info": package_info,
    });
    return print_json(&json_output);
  }

  print_info(&recipe.reference());
  if let Some(description) = &recipe.package.description {
    print_stat("Description", description);
  }
  if let Some(license) = &recipe.package.license {
    print_stat("License", license);
  }
  if !recipe.package.topics.is_empty() {
    let topics: Vec<&str> = recipe.package.topics.iter().map(String::as_str).collect();
    print_stat("Topics", &format_list(&topics));
  }
  print_stat("Root", &root.display().to_string());

  print_section("Options:");
  print_stat("shared", &recipe.options.shared.to_string());
  print_stat("fPIC", &format!("{} (removed on Windows)", recipe.options.fpic));

  print_section("Sources:");
  print_stat("Layout", recipe.layout().as_str());
  print_stat("Exports", &format_list(&recipe.exports()));

  if let Some(dep) = &recipe.dependency {
    let resolution = match &dep.resolution {
      Resolution::System => "system".to_string(),
      Resolution::Vendored(path) => format!("vendored at {}", path.display()),
    };
    print_stat("Dependency", &format!("{}/{} ({})", dep.name, dep.version, resolution));
  }

  print_section("Package info:");
  print_stat("Libraries", &format_list(&package_info.libs));
  print_stat("Include dirs", &format_list(&package_info.includedirs));

  Ok(())
}
