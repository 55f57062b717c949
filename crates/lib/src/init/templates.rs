//! Template content for the init command.

/// Template for `recipe.toml`.
/// Contains `{name}` and `{version}` placeholders for substitution
pub const RECIPE_TEMPLATE: &str = r#"# Package recipe.

[package]
name = "{name}"
version = "{version}"
# license = "MIT"
# author = ""
# url = ""
# description = ""
topics = []

[options]
shared = false
fPIC = true

[sources]
# "flat" builds from CMakeLists.txt at the recipe root.
# "wrapping" builds from wrapping/ and exports wrapping/* and spdlog/*.
layout = "flat"
# exports = ["CMakeLists.txt", "include/*", "src/*", "spdlog/*"]

# An external library the build consumes.
# [dependency]
# name = "spdlog"
# version = "1.11.0"
# resolution = "system"           # or { vendored = "spdlog" }
# generate_files = true

# Declared consumption interface. Defaults to libs = ["{name}"].
# [package_info]
# libs = ["{name}"]
# includedirs = ["include"]
"#;
