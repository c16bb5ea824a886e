//! Layered Configurator Library
//!
//! Loads `{name}{ext}` and `{name}-{env}{ext}` from a configuration
//! directory, deep-merges them and resolves `${dotted.path}` placeholders.
//!
//! ```no_run
//! use layered_configurator::config::{Configurator, Settings};
//! use layered_configurator::context::Context;
//!
//! # fn main() -> Result<(), layered_configurator::error::ConfiguratorError> {
//! let context = Context::from_process()?;
//! let config = Configurator::new(&context).configure(&Settings::new().with_path("./etc"))?;
//! println!("{}", serde_json::Value::Object(config));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod format;
pub mod paths;
