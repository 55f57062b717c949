use pkgdesc_lib::platform::paths::cache_home;
use pkgdesc_lib::platform::platform_triple;
use pkgdesc_lib::settings::SettingsProfile;
use pkgdesc_lib::tool::CMake;

use crate::output::{print_section, print_stat, print_warning};

pub fn cmd_info() -> anyhow::Result<()> {
  println!("System:");
  match platform_triple() {
    Some(triple) => print_stat("Platform", &triple),
    _ => print_warning("Could not detect platform."),
  }

  let detected = SettingsProfile::detect();
  let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

  print_section("Detected settings:");
  print_stat("os", &show(detected.os.map(|v| v.to_string())));
  print_stat("arch", &show(detected.arch.map(|v| v.to_string())));
  print_stat("compiler", &show(detected.compiler.map(|v| v.to_string())));
  print_stat("build_type", &show(detected.build_type.map(|v| v.to_string())));

  print_section("Tools:");
  print_stat("Cache", &cache_home().display().to_string());
  match CMake::locate() {
    Ok(cmake) => print_stat("cmake", &cmake.program().display().to_string()),
    Err(e) => print_warning(&e.to_string()),
  }

  Ok(())
}
