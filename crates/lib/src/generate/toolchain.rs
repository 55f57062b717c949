//! CMake toolchain file rendering.

use std::fmt;
use std::path::Path;

use crate::deps::ResolvedDependency;
use crate::options::BuildOptions;
use crate::platform::arch::Arch;
use crate::platform::os::Os;
use crate::settings::{BuildSettings, CompilerKind};

/// Render `toolchain.cmake`.
///
/// `host` is the OS the build runs on; a different target OS switches CMake
/// into cross-compiling mode. The output holds no timestamps so identical
/// inputs render identical files.
pub fn render_toolchain(
  reference: &str,
  settings: &BuildSettings,
  options: &BuildOptions,
  dependency: Option<&ResolvedDependency>,
  host: Option<Os>,
) -> String {
  Toolchain {
    reference,
    settings,
    options,
    dependency,
    host,
  }
  .to_string()
}

struct Toolchain<'a> {
  reference: &'a str,
  settings: &'a BuildSettings,
  options: &'a BuildOptions,
  dependency: Option<&'a ResolvedDependency>,
  host: Option<Os>,
}

impl fmt::Display for Toolchain<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let settings = self.settings;
    let (cc, cxx) = settings.compiler.kind.executables();

    writeln!(f, "# Toolchain for {} generated by pkgdesc", self.reference)?;
    writeln!(f, "# Settings: {}", settings)?;
    writeln!(f, "# Options: {}", self.options)?;
    writeln!(f)?;

    if self.host != Some(settings.os) {
      writeln!(f, "set(CMAKE_SYSTEM_NAME {})", cmake_system_name(settings.os))?;
      writeln!(f, "set(CMAKE_SYSTEM_PROCESSOR {})", cmake_processor(settings.arch))?;
    }

    writeln!(f, "set(CMAKE_C_COMPILER {})", cc)?;
    writeln!(f, "set(CMAKE_CXX_COMPILER {})", cxx)?;

    if !settings.is_multi_config() {
      writeln!(
        f,
        "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"Build type\" FORCE)",
        settings.build_type
      )?;
    }

    writeln!(
      f,
      "set(BUILD_SHARED_LIBS {} CACHE BOOL \"Build shared libraries\" FORCE)",
      on_off(self.options.shared)
    )?;

    if let Some(fpic) = self.options.fpic {
      writeln!(
        f,
        "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"Position independent code\" FORCE)",
        on_off(fpic)
      )?;
    }

    write_arch(f, settings)?;

    if let Some(dep) = self.dependency {
      writeln!(f)?;
      writeln!(f, "# Dependency {}/{}", dep.name, dep.version)?;
      writeln!(f, "list(PREPEND CMAKE_PREFIX_PATH \"${{CMAKE_CURRENT_LIST_DIR}}\")")?;
      if let Some(root) = &dep.root {
        writeln!(f, "set({}_ROOT \"{}\")", dep.name, cmake_path(root))?;
      }
    }

    Ok(())
  }
}

fn write_arch(f: &mut fmt::Formatter<'_>, settings: &BuildSettings) -> fmt::Result {
  match (settings.os, settings.compiler.kind) {
    (Os::Macos, _) => {
      let arch = match settings.arch {
        Arch::Armv8 => "arm64",
        _ => "x86_64",
      };
      writeln!(f, "set(CMAKE_OSX_ARCHITECTURES \"{}\" CACHE STRING \"\" FORCE)", arch)
    }
    (_, CompilerKind::Msvc) => {
      let platform = match settings.arch {
        Arch::X86 => "Win32",
        Arch::X86_64 => "x64",
        Arch::Armv7 => "ARM",
        Arch::Armv8 => "ARM64",
      };
      writeln!(f, "set(CMAKE_GENERATOR_PLATFORM \"{}\" CACHE STRING \"\" FORCE)", platform)
    }
    _ => {
      let flag = match settings.arch {
        Arch::X86 => "-m32",
        Arch::X86_64 => "-m64",
        Arch::Armv7 | Arch::Armv8 => return Ok(()),
      };
      for var in ["C_FLAGS", "CXX_FLAGS", "SHARED_LINKER_FLAGS", "EXE_LINKER_FLAGS"] {
        writeln!(f, "string(APPEND CMAKE_{}_INIT \" {}\")", var, flag)?;
      }
      Ok(())
    }
  }
}

fn cmake_system_name(os: Os) -> &'static str {
  match os {
    Os::Linux => "Linux",
    Os::Macos => "Darwin",
    Os::Windows => "Windows",
    Os::FreeBsd => "FreeBSD",
  }
}

fn cmake_processor(arch: Arch) -> &'static str {
  match arch {
    Arch::X86 => "i686",
    Arch::X86_64 => "x86_64",
    Arch::Armv7 => "armv7",
    Arch::Armv8 => "aarch64",
  }
}

fn on_off(value: bool) -> &'static str {
  if value { "ON" } else { "OFF" }
}

/// CMake wants forward slashes on every platform.
pub fn cmake_path(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}
