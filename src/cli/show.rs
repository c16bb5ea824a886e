//! Show and plan subcommands for the configurator CLI
//!
//! Both take the same settings flags; `show` additionally controls where and
//! how the resolved configuration is written.

use crate::config::{ArrayMerge, Names, Settings};
use crate::format::OutputFormat;
use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

/// Settings flags shared by `show` and `plan`
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Settings as a JSON object, e.g. '{"name": ["default", "local"]}'
    ///
    /// Explicit flags below override fields given here.
    #[arg(long, value_name = "JSON")]
    pub settings: Option<String>,

    /// Configuration base name (repeat to load several, in order)
    #[arg(short, long, value_name = "NAME")]
    pub name: Vec<String>,

    /// Directory holding the configuration files (default: the etc directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// File extension, including the dot
    #[arg(short, long, value_name = "EXT")]
    pub ext: Option<String>,

    /// How arrays present in several files are combined
    #[arg(long, value_enum)]
    pub arrays: Option<ArrayMerge>,
}

impl SettingsArgs {
    /// Build settings from `--settings` and the explicit flags.
    pub fn to_settings(&self) -> Result<Settings> {
        let mut settings = match self.settings {
            Some(ref raw) => {
                let value: Value =
                    serde_json::from_str(raw).context("--settings is not valid JSON")?;
                Settings::from_value(&value)?
            }
            None => Settings::new(),
        };

        match self.name.as_slice() {
            [] => {}
            [name] => settings.name = Names::One(name.clone()),
            names => settings.name = Names::Many(names.to_vec()),
        }
        if let Some(ref path) = self.path {
            settings.path = Some(path.clone());
        }
        if let Some(ref ext) = self.ext {
            settings.ext = ext.clone();
        }
        if let Some(arrays) = self.arrays {
            settings.arrays = arrays;
        }

        Ok(settings)
    }
}

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
