//! Layered configuration: base files plus environment overlays.
//!
//! For every configured name `N` the files `N{ext}` and `N-{env}{ext}` are
//! loaded in that order and folded into one document, so later files win.
//! Every planned file must exist.

use super::loader::FileLoader;
use super::settings::{Names, Settings};
use crate::context::Context;
use crate::env::Environment;
use crate::error::{ConfigResult, ConfiguratorError};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info};

/// Ordered basenames to load; later entries override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    basenames: Vec<String>,
}

impl LoadPlan {
    /// Expand each name into `[name, "name-{env}"]`, preserving order.
    pub fn new(names: &Names, env: &Environment) -> Self {
        let basenames = names
            .as_slice()
            .iter()
            .flat_map(|name| [name.clone(), format!("{name}-{env}")])
            .collect();
        Self { basenames }
    }

    pub fn basenames(&self) -> &[String] {
        &self.basenames
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.basenames.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.basenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basenames.is_empty()
    }
}

/// Settings after defaults and validation, ready to load.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Absolute directory the files are read from.
    pub dir: PathBuf,
    pub plan: LoadPlan,
}

/// Resolves layered configuration against a [`Context`].
#[derive(Debug, Clone, Copy)]
pub struct Configurator<'a> {
    context: &'a Context,
}

impl<'a> Configurator<'a> {
    pub fn new(context: &'a Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Validate settings and compute the load plan without reading files.
    pub fn resolve(&self, settings: &Settings) -> ConfigResult<Resolved> {
        let path = match settings.path.as_ref() {
            Some(path) => path.clone(),
            None => self
                .context
                .paths()
                .etc()
                .map(PathBuf::from)
                .ok_or_else(|| ConfiguratorError::settings_type(".path", "string", "missing"))?,
        };

        if settings.name.is_empty() {
            let actual = match settings.name {
                Names::One(_) => "empty string",
                Names::Many(_) => "empty array",
            };
            return Err(ConfiguratorError::settings_type(
                ".name",
                "string|Array",
                actual,
            ));
        }

        if path.as_os_str().is_empty() {
            return Err(ConfiguratorError::SettingsPath { path });
        }

        let dir = crate::paths::absolutize(&path, self.context.paths().root());
        if !dir.is_dir() {
            return Err(ConfiguratorError::SettingsPath { path });
        }

        Ok(Resolved {
            dir,
            plan: LoadPlan::new(&settings.name, self.context.env()),
        })
    }

    /// Load and merge every planned file, returning the populated result.
    pub fn configure(&self, settings: &Settings) -> ConfigResult<Map<String, Value>> {
        let Resolved { dir, plan } = self.resolve(settings)?;
        debug!(
            dir = %dir.display(),
            env = %self.context.env(),
            plan = ?plan.basenames(),
            "Resolved load plan"
        );

        let loader =
            FileLoader::new(&dir, settings.ext.as_str(), self.context).with_arrays(settings.arrays);
        let seed = settings.seed.clone().unwrap_or_default();

        let config = plan
            .iter()
            .try_fold(seed, |acc, basename| loader.load(acc, basename))?;

        info!(
            dir = %dir.display(),
            files = plan.len(),
            keys = config.len(),
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Validate untyped settings, then [`configure`](Self::configure).
    pub fn configure_value(&self, settings: &Value) -> ConfigResult<Map<String, Value>> {
        self.configure(&Settings::from_value(settings)?)
    }
}

/// Shorthand for `Configurator::new(context).configure(settings)`.
pub fn configure(context: &Context, settings: &Settings) -> ConfigResult<Map<String, Value>> {
    Configurator::new(context).configure(settings)
}
