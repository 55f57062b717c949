//! Driving the descriptor step by step.

use std::collections::BTreeMap;
use std::fs;

use pkgdesc_lib::descriptor::{Descriptor, LifecycleError, Stage, Step};
use pkgdesc_lib::exports::export_sources;
use pkgdesc_lib::package::overlay_headers;
use pkgdesc_lib::platform::os::Os;
use pkgdesc_lib::recipe::Recipe;
use pkgdesc_lib::settings::BuildSettings;

use super::common::{FakeTool, TestEnv, linux_settings};

fn settings() -> BuildSettings {
  linux_settings().resolve().unwrap()
}

#[tokio::test]
async fn full_lifecycle_in_order() {
  let env = TestEnv::flat();
  let (recipe, root) = Recipe::load(&env.recipe_dir()).unwrap();
  let tool = FakeTool::default();
  let mut descriptor = Descriptor::new(&recipe, settings(), env.home()).with_host(Some(Os::Linux));

  let configured = descriptor.config_options(&BTreeMap::new()).unwrap();
  assert!(configured.options.has_fpic());

  assert_eq!(descriptor.options(), Some(&configured.options));

  let folders = descriptor.layout().unwrap();
  assert_eq!(descriptor.folders(), Some(&folders));
  export_sources(&root, &recipe.exports(), &folders.source).unwrap();

  let generated = descriptor.generate().unwrap();
  assert!(generated.toolchain.is_file());
  assert!(generated.dependency_files.is_empty());

  descriptor.build(&tool).await.unwrap();
  let packaged = descriptor.package(&tool).await.unwrap();
  assert_eq!(packaged.headers.copied.len(), 1);

  let info = descriptor.package_info().unwrap().clone();
  assert_eq!(info.libs, vec!["slog"]);
  assert_eq!(descriptor.stage(), Stage::Finished);

  // Fixed once computed
  assert_eq!(descriptor.package_info().unwrap(), &info);
}

#[tokio::test]
async fn build_before_generate_is_out_of_order() {
  let env = TestEnv::flat();
  let (recipe, _) = Recipe::load(&env.recipe_dir()).unwrap();
  let mut descriptor = Descriptor::new(&recipe, settings(), env.home());

  descriptor.config_options(&BTreeMap::new()).unwrap();
  descriptor.layout().unwrap();

  let err = descriptor.build(&FakeTool::default()).await.unwrap_err();
  assert!(matches!(
    err,
    LifecycleError::OutOfOrder {
      step: Step::Build,
      stage: Stage::LaidOut,
      expected: Stage::Generated,
    }
  ));
  assert!(err.to_string().contains("build called out of order"));
}

#[tokio::test]
async fn failed_build_aborts_remaining_steps() {
  let env = TestEnv::flat();
  let (recipe, root) = Recipe::load(&env.recipe_dir()).unwrap();
  let tool = FakeTool::failing("undefined reference to `spdlog::info'");
  let mut descriptor = Descriptor::new(&recipe, settings(), env.home());

  descriptor.config_options(&BTreeMap::new()).unwrap();
  let folders = descriptor.layout().unwrap();
  export_sources(&root, &recipe.exports(), &folders.source).unwrap();
  descriptor.generate().unwrap();

  assert!(matches!(descriptor.build(&tool).await, Err(LifecycleError::Build(_))));
  assert_eq!(descriptor.stage(), Stage::Failed);

  assert!(matches!(
    descriptor.package(&FakeTool::default()).await,
    Err(LifecycleError::Aborted { step: Step::Package })
  ));
  assert!(matches!(
    descriptor.package_info(),
    Err(LifecycleError::Aborted {
      step: Step::PackageInfo
    })
  ));
  assert!(!folders.package.join("package_info.json").exists());
}

#[tokio::test]
async fn header_overlay_is_idempotent() {
  let env = TestEnv::flat();
  env.write_file("recipe/include/detail/b.hpp", "#pragma once\n");
  let (recipe, root) = Recipe::load(&env.recipe_dir()).unwrap();
  let tool = FakeTool::default();
  let mut descriptor = Descriptor::new(&recipe, settings(), env.home());

  descriptor.config_options(&BTreeMap::new()).unwrap();
  let folders = descriptor.layout().unwrap();
  export_sources(&root, &recipe.exports(), &folders.source).unwrap();
  descriptor.generate().unwrap();
  descriptor.build(&tool).await.unwrap();
  let packaged = descriptor.package(&tool).await.unwrap();
  assert_eq!(packaged.headers.copied.len(), 2);
  assert!(folders.package.join("include/detail/b.hpp").is_file());

  let again = overlay_headers(&folders.headers, &folders.package.join("include")).unwrap();
  assert!(again.copied.is_empty());
  assert!(again.overwritten.is_empty());
  assert_eq!(again.unchanged.len(), 2);
}

#[tokio::test]
async fn overlay_replaces_differing_installed_header() {
  let env = TestEnv::flat();
  let (recipe, root) = Recipe::load(&env.recipe_dir()).unwrap();
  let mut descriptor = Descriptor::new(&recipe, settings(), env.home());

  descriptor.config_options(&BTreeMap::new()).unwrap();
  let folders = descriptor.layout().unwrap();
  export_sources(&root, &recipe.exports(), &folders.source).unwrap();
  descriptor.generate().unwrap();
  descriptor.build(&FakeTool::default()).await.unwrap();
  descriptor.package(&FakeTool::default()).await.unwrap();

  let installed = folders.package.join("include/a.h");
  fs::write(&installed, "// stale install output\n").unwrap();

  let report = overlay_headers(&folders.headers, &folders.package.join("include")).unwrap();
  assert_eq!(report.overwritten.len(), 1);
  assert_eq!(
    fs::read_to_string(&installed).unwrap(),
    fs::read_to_string(root.join("include/a.h")).unwrap()
  );
}

#[test]
fn config_options_removes_fpic_only_on_windows() {
  let recipe = Recipe::parse(super::common::SLOG_RECIPE).unwrap();

  for os in Os::ALL {
    let mut profile = linux_settings();
    profile.set("os", os.as_str()).unwrap();
    if os == Os::Windows {
      profile.set("compiler", "msvc").unwrap();
    }
    let mut descriptor = Descriptor::new(&recipe, profile.resolve().unwrap(), "/unused");

    let configured = descriptor.config_options(&BTreeMap::new()).unwrap();
    assert_eq!(configured.options.has_fpic(), os != Os::Windows, "os {os}");
  }
}
