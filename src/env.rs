//! Active environment name.
//!
//! The environment selects which `{name}-{environment}` overlay files are
//! loaded on top of each base file.

use std::fmt;

/// Environment variable selecting the active environment.
pub const ENV_VAR: &str = "CONFIGURATOR_ENV";

/// Environment used when [`ENV_VAR`] is unset or blank.
pub const DEFAULT_ENV: &str = "development";

/// The resolved environment name. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment(String);

impl Environment {
    /// Resolve from the process environment.
    pub fn resolve() -> Self {
        Self::from_var(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Resolve from a raw variable value.
    ///
    /// `None`, blank values and the literal `undefined` fall back to
    /// [`DEFAULT_ENV`].
    pub fn from_var(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("undefined") => Self(DEFAULT_ENV.to_string()),
            Some(value) => Self(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self(DEFAULT_ENV.to_string())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
