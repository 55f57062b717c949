//! End-to-end `create` tests.

use std::fs;

use pkgdesc_lib::consts::{DEPENDENCIES_FILE, PACKAGE_INFO_FILE};
use pkgdesc_lib::create::{CreateError, create};
use pkgdesc_lib::descriptor::LifecycleError;
use pkgdesc_lib::info::PackageInfo;
use pkgdesc_lib::recipe::RecipeError;
use pkgdesc_lib::tool::ToolError;

use super::common::{FakeTool, SLOG_RECIPE, TestEnv};

#[tokio::test]
async fn create_packages_library_and_headers() {
  let env = TestEnv::flat();

  let report = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();

  assert_eq!(report.reference, "slog/1.0.0");
  assert!(report.folders.package.starts_with(env.home().join("slog/1.0.0")));
  assert!(report.folders.package.join("lib/libslog.a").is_file());
  assert!(report.folders.package.join("include/a.h").is_file());
  assert_eq!(report.headers_copied, 1);
  assert_eq!(report.package_info.libs, vec!["slog"]);
  assert_eq!(report.package_info.includedirs, vec!["include"]);

  let written = PackageInfo::read(&report.folders.package).unwrap();
  assert_eq!(written, report.package_info);
  assert!(report.folders.package.join(PACKAGE_INFO_FILE).is_file());
}

#[tokio::test]
async fn create_twice_yields_identical_package() {
  let env = TestEnv::flat();
  let options = env.options(&[]);

  let first = create(&env.recipe_dir(), &options, &FakeTool::default()).await.unwrap();
  let second = create(&env.recipe_dir(), &options, &FakeTool::default()).await.unwrap();

  assert_eq!(first.package_id, second.package_id);
  assert_eq!(first.folders, second.folders);
  assert_eq!(first.content_hash, second.content_hash);
}

#[tokio::test]
async fn shared_toggle_produces_distinct_packages_with_same_lib_name() {
  let env = TestEnv::flat();

  let static_pkg = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();
  let shared_pkg = create(
    &env.recipe_dir(),
    &env.options(&[("shared", "True")]),
    &FakeTool::default(),
  )
  .await
  .unwrap();

  assert_ne!(static_pkg.package_id, shared_pkg.package_id);
  assert_ne!(static_pkg.folders.package, shared_pkg.folders.package);
  assert_eq!(static_pkg.package_info, shared_pkg.package_info);

  assert!(static_pkg.folders.package.join("lib/libslog.a").is_file());
  assert!(shared_pkg.folders.package.join("lib/libslog.so").is_file());
  // The static package is untouched by the shared build
  assert!(!static_pkg.folders.package.join("lib/libslog.so").exists());
}

#[tokio::test]
async fn empty_include_packages_zero_headers() {
  let env = TestEnv::flat();
  fs::remove_file(env.recipe_dir().join("include/a.h")).unwrap();

  let report = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();

  assert_eq!(report.headers_copied, 0);
  assert!(report.folders.package.join("lib/libslog.a").is_file());
}

#[tokio::test]
async fn stale_snapshot_files_are_removed_on_reexport() {
  let env = TestEnv::flat();
  env.write_file("recipe/include/old.h", "#pragma once\n");

  let first = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();
  assert!(first.folders.package.join("include/old.h").is_file());

  fs::remove_file(env.recipe_dir().join("include/old.h")).unwrap();
  let second = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();

  assert!(!second.folders.source.join("include/old.h").exists());
  assert!(!second.folders.package.join("include/old.h").exists());
  assert_ne!(first.content_hash, second.content_hash);
}

#[tokio::test]
async fn build_failure_propagates_tool_diagnostic_verbatim() {
  let env = TestEnv::flat();
  let diagnostic = "src/a.cpp:2:10: error: expected ';' before '}' token";

  let err = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::failing(diagnostic))
    .await
    .unwrap_err();

  match err {
    CreateError::Lifecycle(LifecycleError::Build(ToolError::Failed { code, stderr, .. })) => {
      assert_eq!(code, Some(2));
      assert_eq!(stderr, diagnostic);
    }
    other => panic!("expected build failure, got {other:?}"),
  }
}

#[tokio::test]
async fn unknown_option_is_rejected() {
  let env = TestEnv::flat();

  let err = create(
    &env.recipe_dir(),
    &env.options(&[("header_only", "True")]),
    &FakeTool::default(),
  )
  .await
  .unwrap_err();

  assert!(matches!(err, CreateError::Lifecycle(LifecycleError::Options(_))));
}

#[tokio::test]
async fn windows_ignores_fpic_override() {
  let env = TestEnv::flat();
  let mut options = env.options(&[("fPIC", "False")]);
  options.profile.settings.set("os", "Windows").unwrap();
  options.profile.settings.set("compiler", "msvc").unwrap();

  let report = create(&env.recipe_dir(), &options, &FakeTool::default()).await.unwrap();

  assert!(!report.options.has_fpic());
  // msvc is multi-config: one build folder for every build type
  assert!(report.folders.build.ends_with("build"));
}

#[tokio::test]
async fn unsupported_settings_fail_before_building() {
  let env = TestEnv::flat();
  let mut options = env.options(&[]);
  options.profile.settings.set("compiler", "apple-clang").unwrap();

  let err = create(&env.recipe_dir(), &options, &FakeTool::default())
    .await
    .unwrap_err();

  assert!(matches!(err, CreateError::Lifecycle(LifecycleError::Generate(_))));
}

#[tokio::test]
async fn wrapping_layout_with_vendored_dependency() {
  let env = TestEnv::wrapping();

  let report = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap();

  let generators = &report.folders.generators;
  assert!(generators.join("spdlog-config.cmake").is_file());
  assert!(generators.join(DEPENDENCIES_FILE).is_file());

  let toolchain = fs::read_to_string(generators.join("toolchain.cmake")).unwrap();
  assert!(toolchain.contains("CMAKE_PREFIX_PATH"));

  assert!(report.folders.package.join("include/slog/log.h").is_file());
  assert!(report.folders.package.join("lib/libslog.a").is_file());
  assert_eq!(report.package_info.libs, vec!["slog"]);
}

#[tokio::test]
async fn missing_vendored_dependency_fails_generate() {
  let env = TestEnv::wrapping();
  fs::remove_dir_all(env.recipe_dir().join("spdlog")).unwrap();

  let err = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap_err();

  assert!(matches!(err, CreateError::Lifecycle(LifecycleError::Generate(_))));
}

#[tokio::test]
async fn missing_recipe_is_reported() {
  let env = TestEnv::flat();

  let err = create(&env.temp.path().join("nowhere"), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap_err();

  assert!(matches!(err, CreateError::Recipe(_)));
}

#[tokio::test]
async fn version_cannot_escape_cache_home() {
  let env = TestEnv::flat();
  env.write_file(
    "recipe/recipe.toml",
    &SLOG_RECIPE.replace("version = \"1.0.0\"", "version = \"../../../escaped\""),
  );

  let err = create(&env.recipe_dir(), &env.options(&[]), &FakeTool::default())
    .await
    .unwrap_err();

  assert!(matches!(err, CreateError::Recipe(RecipeError::InvalidVersion(_))));
  assert!(!env.home().exists());
}
