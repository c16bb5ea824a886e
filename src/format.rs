//! Output formatting for resolved configuration.

use crate::config::LoadPlan;
use crate::paths::DirectoryMap;
use anyhow::Result;
use clap::ValueEnum;
use serde_json::{Map, Value};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Render a value, pretty-printed, with a trailing newline.
    pub fn render(self, value: &Value) -> Result<String> {
        let mut out = match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

/// Format a resolved configuration.
pub fn format_config(config: &Map<String, Value>, format: OutputFormat) -> Result<String> {
    format.render(&Value::Object(config.clone()))
}

/// Format a directory map.
pub fn format_paths(paths: &DirectoryMap, format: OutputFormat) -> Result<String> {
    format.render(&paths.to_value())
}

/// Format a load plan, one basename per line.
pub fn format_plan(plan: &LoadPlan) -> String {
    let mut out = String::new();
    for basename in plan.iter() {
        out.push_str(basename);
        out.push('\n');
    }
    out
}
