//! The package descriptor and its lifecycle.
//!
//! A [`Descriptor`] is created once per build invocation and driven through
//! a fixed sequence of steps:
//!
//! 1. `config_options` - build the option set (fPIC removed on Windows)
//! 2. `layout` - choose the cache folders
//! 3. `generate` - validate settings, resolve the dependency, write toolchain files
//! 4. `build` - configure and compile with the build tool
//! 5. `package` - install, then overlay headers
//! 6. `package_info` - publish consumption info
//!
//! Each step requires the previous one to have succeeded. A failing step
//! moves the descriptor to [`Stage::Failed`] and every later call returns
//! [`LifecycleError::Aborted`]. There are no retries.

mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::generate::{GenerateRequest, GeneratedFiles, generate};
use crate::info::PackageInfo;
use crate::layout::{Folders, cmake_layout, package_base};
use crate::options::{BuildOptions, config_options};
use crate::package::{PackageReport, package};
use crate::platform::os::Os;
use crate::recipe::Recipe;
use crate::settings::BuildSettings;
use crate::tool::{BuildTool, ToolContext};
use crate::util::hash::{Identify, PackageId};

pub use types::*;

/// Everything that distinguishes one binary package from another.
#[derive(Serialize)]
struct Configuration<'a> {
  recipe: &'a Recipe,
  settings: &'a BuildSettings,
  options: &'a BuildOptions,
}

impl Identify for Configuration<'_> {}

/// Result of `config_options`: the final option set and the id it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configured {
  pub options: BuildOptions,
  pub package_id: PackageId,
}

pub struct Descriptor<'r> {
  recipe: &'r Recipe,
  settings: BuildSettings,
  home: PathBuf,
  host: Option<Os>,
  stage: Stage,
  options: Option<BuildOptions>,
  package_id: Option<PackageId>,
  folders: Option<Folders>,
  generated: Option<GeneratedFiles>,
  info: Option<PackageInfo>,
}

impl<'r> Descriptor<'r> {
  /// Instantiate for one invocation. `home` is the cache root.
  pub fn new(recipe: &'r Recipe, settings: BuildSettings, home: impl Into<PathBuf>) -> Self {
    Self {
      recipe,
      settings,
      home: home.into(),
      host: Os::current(),
      stage: Stage::Instantiated,
      options: None,
      package_id: None,
      folders: None,
      generated: None,
      info: None,
    }
  }

  /// Override the detected host OS (decides whether to cross-compile).
  pub fn with_host(mut self, host: Option<Os>) -> Self {
    self.host = host;
    self
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  pub fn options(&self) -> Option<&BuildOptions> {
    self.options.as_ref()
  }

  pub fn package_id(&self) -> Option<&PackageId> {
    self.package_id.as_ref()
  }

  pub fn folders(&self) -> Option<&Folders> {
    self.folders.as_ref()
  }

  /// Step 1: build the option set from recipe defaults and `overrides`.
  pub fn config_options(&mut self, overrides: &BTreeMap<String, String>) -> Result<Configured, LifecycleError> {
    self.begin(Step::ConfigOptions)?;

    let result = (|| {
      let mut options = config_options(&self.recipe.options, self.settings.os);
      options.apply_overrides(overrides)?;

      let id = Configuration {
        recipe: self.recipe,
        settings: &self.settings,
        options: &options,
      }
      .package_id()?;

      Ok::<_, LifecycleError>((options, id))
    })();

    let (options, id) = self.finish(Step::ConfigOptions, result)?;
    debug!(%options, package_id = %id, "configured options");
    self.options = Some(options);
    self.package_id = Some(id.clone());
    Ok(Configured {
      options,
      package_id: id,
    })
  }

  /// Step 2: lay out the cache folders for this configuration.
  pub fn layout(&mut self) -> Result<Folders, LifecycleError> {
    self.begin(Step::Layout)?;

    let id = self.package_id.as_ref().ok_or(LifecycleError::OutOfOrder {
      step: Step::Layout,
      stage: self.stage,
      expected: Step::Layout.requires(),
    })?;
    let base = package_base(&self.home, &self.recipe.package.name, &self.recipe.package.version, id);
    let folders = cmake_layout(&base, self.recipe.layout(), &self.settings);

    self.finish(Step::Layout, Ok(()))?;
    self.folders = Some(folders.clone());
    Ok(folders)
  }

  /// Step 3: write the toolchain and dependency files.
  pub fn generate(&mut self) -> Result<GeneratedFiles, LifecycleError> {
    self.begin(Step::Generate)?;

    let reference = self.recipe.reference();
    let result = match (&self.options, &self.folders) {
      (Some(options), Some(folders)) => generate(&GenerateRequest {
        reference: &reference,
        settings: &self.settings,
        options,
        folders,
        dependency: self.recipe.dependency.as_ref(),
        host: self.host,
      })
      .map_err(LifecycleError::from),
      _ => Err(self.out_of_order(Step::Generate)),
    };

    let generated = self.finish(Step::Generate, result)?;
    self.generated = Some(generated.clone());
    Ok(generated)
  }

  /// Step 4: configure and compile.
  pub async fn build<T: BuildTool + ?Sized>(&mut self, tool: &T) -> Result<(), LifecycleError> {
    self.begin(Step::Build)?;

    let result = match self.tool_context() {
      Some(ctx) => {
        info!(tool = tool.name(), build = %ctx.folders.build.display(), "building");
        match tool.configure(&ctx).await {
          Ok(()) => tool.build(&ctx).await.map_err(LifecycleError::from),
          Err(e) => Err(LifecycleError::from(e)),
        }
      }
      None => Err(self.out_of_order(Step::Build)),
    };

    self.finish(Step::Build, result)
  }

  /// Step 5: install into the package folder and overlay headers.
  pub async fn package<T: BuildTool + ?Sized>(&mut self, tool: &T) -> Result<PackageReport, LifecycleError> {
    self.begin(Step::Package)?;

    let result = match self.tool_context() {
      Some(ctx) => package(tool, &ctx).await.map_err(LifecycleError::from),
      None => Err(self.out_of_order(Step::Package)),
    };

    self.finish(Step::Package, result)
  }

  /// Step 6: the consumption info, computed once and fixed afterwards.
  ///
  /// The first call writes `package_info.json` into the package folder;
  /// later calls return the same value without touching the disk.
  pub fn package_info(&mut self) -> Result<&PackageInfo, LifecycleError> {
    if self.info.is_none() {
      self.begin(Step::PackageInfo)?;

      let info = self.recipe.package_info();
      let result = match &self.folders {
        Some(folders) => info.write(&folders.package).map_err(LifecycleError::from),
        None => Err(self.out_of_order(Step::PackageInfo)),
      };
      let path = self.finish(Step::PackageInfo, result)?;
      debug!(path = %path.display(), libs = ?info.libs, "wrote package info");
      self.info = Some(info);
    }

    self.info.as_ref().ok_or(LifecycleError::Aborted {
      step: Step::PackageInfo,
    })
  }

  fn tool_context(&self) -> Option<ToolContext<'_>> {
    let folders = self.folders.as_ref()?;
    let toolchain: &Path = &self.generated.as_ref()?.toolchain;
    Some(ToolContext {
      settings: &self.settings,
      folders,
      toolchain,
    })
  }

  fn begin(&self, step: Step) -> Result<(), LifecycleError> {
    if self.stage == Stage::Failed {
      return Err(LifecycleError::Aborted { step });
    }
    if self.stage != step.requires() {
      return Err(self.out_of_order(step));
    }
    debug!(%step, "lifecycle step");
    Ok(())
  }

  fn finish<T>(&mut self, step: Step, result: Result<T, LifecycleError>) -> Result<T, LifecycleError> {
    match result {
      Ok(value) => {
        self.stage = step.reaches();
        Ok(value)
      }
      Err(e) => {
        self.stage = Stage::Failed;
        Err(e)
      }
    }
  }

  fn out_of_order(&self, step: Step) -> LifecycleError {
    LifecycleError::OutOfOrder {
      step,
      stage: self.stage,
      expected: step.requires(),
    }
  }
}
