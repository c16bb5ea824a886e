//! Loading of a single configuration file into the accumulator.
//!
//! Each step reads `{dir}/{basename}{ext}`, deep-merges it over the
//! accumulated configuration and populates placeholders. During population
//! the merged document also exposes:
//! - `Path` - the [`DirectoryMap`](crate::paths::DirectoryMap) as an object
//! - `Env` - the active environment name
//!
//! Both are removed again afterwards unless a file defined them itself.

use super::format::{FileFormat, type_name};
use super::merge::{ArrayMerge, merge_maps};
use super::populate::populate_map;
use crate::context::Context;
use crate::error::{ConfigResult, ConfiguratorError};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

/// Key exposing the directory map to placeholders.
pub const PATH_KEY: &str = "Path";

/// Key exposing the environment name to placeholders.
pub const ENV_KEY: &str = "Env";

/// Loads configuration files from one directory with one extension.
#[derive(Debug, Clone)]
pub struct FileLoader<'a> {
    dir: PathBuf,
    ext: String,
    format: FileFormat,
    arrays: ArrayMerge,
    context: &'a Context,
}

impl<'a> FileLoader<'a> {
    pub fn new(dir: impl Into<PathBuf>, ext: impl Into<String>, context: &'a Context) -> Self {
        let ext = ext.into();
        Self {
            dir: dir.into(),
            format: FileFormat::from_ext(&ext),
            ext,
            arrays: ArrayMerge::default(),
            context,
        }
    }

    pub fn with_arrays(mut self, arrays: ArrayMerge) -> Self {
        self.arrays = arrays;
        self
    }

    /// Full path of the file for `basename`.
    pub fn file_path(&self, basename: &str) -> PathBuf {
        self.dir.join(format!("{basename}{}", self.ext))
    }

    /// Read and parse the file for `basename`.
    ///
    /// Fails with a file error when the file is missing, and with a parse
    /// error when it cannot be read or is not a mapping at the top level.
    pub fn read(&self, basename: &str) -> ConfigResult<Map<String, Value>> {
        let path = self.file_path(basename);
        if !path.is_file() {
            return Err(ConfiguratorError::File {
                basename: basename.to_string(),
                path,
            });
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| ConfiguratorError::parse(basename, e))?;

        let parsed = self
            .format
            .parse(&content)
            .map_err(|message| ConfiguratorError::Parse {
                basename: basename.to_string(),
                message,
            })?;

        match parsed {
            Value::Object(map) => Ok(map),
            other => Err(ConfiguratorError::parse(
                basename,
                format!(
                    "expected a mapping at the top level, found {}",
                    type_name(&other)
                ),
            )),
        }
    }

    /// Merge the file for `basename` into `acc` and populate the result.
    pub fn load(&self, acc: Map<String, Value>, basename: &str) -> ConfigResult<Map<String, Value>> {
        let parsed = self.read(basename)?;
        debug!(
            basename = %basename,
            path = %self.file_path(basename).display(),
            keys = parsed.len(),
            "Loaded configuration file"
        );

        let mut merged = merge_maps(acc, parsed, self.arrays);

        let mut injected = Vec::with_capacity(2);
        if !merged.contains_key(PATH_KEY) {
            merged.insert(PATH_KEY.to_string(), self.context.paths().to_value());
            injected.push(PATH_KEY);
        }
        if !merged.contains_key(ENV_KEY) {
            merged.insert(
                ENV_KEY.to_string(),
                Value::String(self.context.env().to_string()),
            );
            injected.push(ENV_KEY);
        }

        let mut populated =
            populate_map(&merged).map_err(|e| ConfiguratorError::parse(basename, e))?;

        for key in injected {
            populated.remove(key);
        }
        Ok(populated)
    }
}
