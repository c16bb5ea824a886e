//! Layered configuration loading.
//!
//! A configuration call folds an ordered list of files into one document:
//! 1. **Base** - `{name}{ext}` for each configured name
//! 2. **Environment overlay** - `{name}-{env}{ext}`, right after its base
//!
//! ## Merge Strategy
//! - Objects: deep merge field-by-field, later files win
//! - Arrays: concatenated (or replaced, see [`ArrayMerge`])
//! - Scalars: replaced
//!
//! After every merge, `${dotted.path}` placeholders are resolved against the
//! merged document plus the `Path` and `Env` bookkeeping keys.

mod configurator;
mod format;
mod loader;
mod merge;
mod populate;
mod settings;

pub use configurator::{Configurator, LoadPlan, Resolved, configure};
pub use format::{FileFormat, type_name};
pub use loader::{ENV_KEY, FileLoader, PATH_KEY};
pub use merge::{ArrayMerge, deep_merge, merge_maps};
pub use populate::{populate, populate_map};
pub use settings::{DEFAULT_EXT, DEFAULT_NAME, Names, Settings};
