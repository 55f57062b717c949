//! pkgdesc-lib: Core types and logic for pkgdesc
//!
//! This crate turns a package recipe plus build settings into an installed,
//! described binary package:
//! - `Recipe`: identity, option defaults, source layout and dependency policy
//! - `Descriptor`: the ordered lifecycle from option configuration to package info
//! - `BuildTool`: the seam to the external build system (CMake by default)
//! - `create`: export, build and package in one call

pub mod consts;
pub mod create;
pub mod deps;
pub mod descriptor;
pub mod exports;
pub mod generate;
pub mod info;
pub mod init;
pub mod layout;
pub mod options;
pub mod package;
pub mod platform;
pub mod profile;
pub mod recipe;
pub mod settings;
pub mod tool;
pub mod util;
