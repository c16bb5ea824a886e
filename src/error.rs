//! Structured error types for configuration loading.
//!
//! Every failure is fatal for the call that produced it. Variants carry the
//! structured fields; the display text is only built at the presentation
//! boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving directories, validating settings or
/// loading configuration files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfiguratorError {
    /// A directory declared through the environment does not exist.
    #[error("Invalid directory \"{name}\": {}", .path.display())]
    Path { name: String, path: PathBuf },

    /// Settings (or one of their fields) have the wrong type.
    ///
    /// `field` is empty for the whole settings value, `.name`-style otherwise.
    #[error("Invalid settings {field}, expected {{{expected}}}, got \"{actual}\"")]
    SettingsType {
        field: String,
        expected: String,
        actual: String,
    },

    /// `settings.path` is not an existing directory.
    #[error("Invalid settings.path: {}", .path.display())]
    SettingsPath { path: PathBuf },

    /// A planned configuration file does not exist.
    #[error("Invalid \"{basename}\" configuration: {} was not found", .path.display())]
    File { basename: String, path: PathBuf },

    /// A configuration file exists but could not be read, parsed or populated.
    ///
    /// `message` is the underlying error's text, unchanged.
    #[error("Invalid \"{basename}\" configuration: {message}")]
    Parse { basename: String, message: String },
}

impl ConfiguratorError {
    pub fn settings_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::SettingsType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn parse(basename: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            basename: basename.into(),
            message: err.to_string(),
        }
    }

    /// Stable name of the error kind, for programmatic matching and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Path { .. } => "ConfiguratorPathError",
            Self::SettingsType { .. } => "ConfiguratorSettingsTypeError",
            Self::SettingsPath { .. } => "ConfiguratorSettingsPathError",
            Self::File { .. } => "ConfiguratorFileError",
            Self::Parse { .. } => "ConfiguratorParseError",
        }
    }
}

/// Failures of `${path}` placeholder substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopulateError {
    #[error("Unresolved placeholder \"${{{0}}}\"")]
    Unresolved(String),

    #[error("Circular placeholder reference: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("Unterminated placeholder in \"{0}\"")]
    Unterminated(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfiguratorError>;
