//! Caller-supplied settings for a configuration call.

use super::format::type_name;
use super::merge::ArrayMerge;
use crate::error::{ConfigResult, ConfiguratorError};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::warn;

/// Default base name of the configuration files.
pub const DEFAULT_NAME: &str = "default";

/// Default configuration file extension.
pub const DEFAULT_EXT: &str = ".json";

const KNOWN_KEYS: [&str; 5] = ["name", "path", "ext", "arrays", "seed"];

/// One or more configuration base names, processed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Names {
    One(String),
    Many(Vec<String>),
}

impl Names {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Names::One(name) => std::slice::from_ref(name),
            Names::Many(names) => names,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Names::One(name) => name.is_empty(),
            Names::Many(names) => names.is_empty(),
        }
    }
}

impl Default for Names {
    fn default() -> Self {
        Names::One(DEFAULT_NAME.to_string())
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names::One(name.to_string())
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names::One(name)
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names::Many(names)
    }
}

/// Effective settings of a configuration call.
///
/// `path` falls back to the `etc` directory of the
/// [`DirectoryMap`](crate::paths::DirectoryMap) when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub name: Names,
    pub path: Option<PathBuf>,
    pub ext: String,
    pub arrays: ArrayMerge,
    /// Initial accumulator the first file is merged into.
    pub seed: Option<Map<String, Value>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: Names::default(),
            path: None,
            ext: DEFAULT_EXT.to_string(),
            arrays: ArrayMerge::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<Names>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = ext.into();
        self
    }

    pub fn with_arrays(mut self, arrays: ArrayMerge) -> Self {
        self.arrays = arrays;
        self
    }

    pub fn with_seed(mut self, seed: Map<String, Value>) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build settings from an untyped value, overlaying it on the defaults.
    ///
    /// Fields are checked in a fixed order (`ext`, `path`, `name`, then the
    /// optional `arrays` and `seed`); the first mismatch is reported.
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        let Value::Object(map) = value else {
            return Err(ConfiguratorError::settings_type(
                "",
                "Object",
                type_name(value),
            ));
        };

        for key in map.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            warn!(key = %key, "Ignoring unknown settings key");
        }

        let mut settings = Self::new();

        if let Some(ext) = map.get("ext") {
            settings.ext = expect_string(ext, ".ext")?.to_string();
        }

        if let Some(path) = map.get("path") {
            settings.path = Some(PathBuf::from(expect_string(path, ".path")?));
        }

        if let Some(name) = map.get("name") {
            settings.name = parse_names(name)?;
        }

        if let Some(arrays) = map.get("arrays") {
            let policy = match arrays {
                Value::String(s) => ArrayMerge::from_str(s).ok_or_else(|| {
                    ConfiguratorError::settings_type(".arrays", "concat|replace", s.as_str())
                })?,
                other => {
                    return Err(ConfiguratorError::settings_type(
                        ".arrays",
                        "concat|replace",
                        type_name(other),
                    ));
                }
            };
            settings.arrays = policy;
        }

        if let Some(seed) = map.get("seed") {
            match seed {
                Value::Object(seed) => settings.seed = Some(seed.clone()),
                other => {
                    return Err(ConfiguratorError::settings_type(
                        ".seed",
                        "Object",
                        type_name(other),
                    ));
                }
            }
        }

        Ok(settings)
    }
}

fn expect_string<'v>(value: &'v Value, field: &str) -> ConfigResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| ConfiguratorError::settings_type(field, "string", type_name(value)))
}

fn parse_names(value: &Value) -> ConfigResult<Names> {
    match value {
        Value::String(name) => Ok(Names::One(name.clone())),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| expect_string(item, &format!(".name[{i}]")).map(str::to_string))
            .collect::<ConfigResult<Vec<_>>>()
            .map(Names::Many),
        other => Err(ConfiguratorError::settings_type(
            ".name",
            "string|Array",
            type_name(other),
        )),
    }
}
