/// Application name used for cache and config directories
pub const APP_NAME: &str = "pkgdesc";

/// File name of a package recipe inside a recipe folder
pub const RECIPE_FILE: &str = "recipe.toml";

/// File written into the package folder describing how to consume it
pub const PACKAGE_INFO_FILE: &str = "package_info.json";

/// Generated CMake toolchain file name
pub const TOOLCHAIN_FILE: &str = "toolchain.cmake";

/// Generated dependency manifest file name
pub const DEPENDENCIES_FILE: &str = "dependencies.json";

/// Length of the truncated package id hash
pub const PACKAGE_ID_LEN: usize = 20;

/// Environment variable overriding the cache root
pub const HOME_ENV: &str = "PKGDESC_HOME";

/// Environment variable overriding the cmake executable
pub const CMAKE_ENV: &str = "PKGDESC_CMAKE";

/// Header patterns copied into the package include folder after install
pub const HEADER_PATTERNS: &[&str] = &["*.h", "*.hpp"];
