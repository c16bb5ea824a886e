//! Named directory resolution.
//!
//! Directories are declared through environment variables sharing the
//! [`DIRECTORIES_PREFIX`] prefix; the suffix becomes the logical name:
//!
//! ```text
//! CONFIGURATOR_DIRECTORIES_etc=./etc      -> etc  = $CWD/etc
//! CONFIGURATOR_DIRECTORIES_logs=/var/log  -> logs = /var/log
//! ```
//!
//! The resulting [`DirectoryMap`] always contains `root`, the current
//! working directory.

use crate::error::{ConfigResult, ConfiguratorError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Prefix of the environment variables declaring directories.
pub const DIRECTORIES_PREFIX: &str = "CONFIGURATOR_DIRECTORIES_";

/// Logical name always mapped to the current working directory.
pub const ROOT: &str = "root";

/// Logical name of the default configuration directory.
pub const ETC: &str = "etc";

/// Immutable mapping of logical directory names to absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryMap {
    dirs: BTreeMap<String, PathBuf>,
}

impl DirectoryMap {
    /// Resolve from the process environment and working directory.
    pub fn resolve() -> ConfigResult<Self> {
        let cwd = working_dir(std::env::current_dir())?;
        Self::resolve_from(std::env::vars_os(), &cwd)
    }

    /// Resolve from explicit variables and working directory.
    ///
    /// Declarations are checked in key order; the first one that is not an
    /// existing directory aborts resolution. Keys that are not valid UTF-8
    /// never match the prefix.
    pub fn resolve_from<I, K, V>(vars: I, cwd: &Path) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let mut declared: Vec<(String, PathBuf)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.as_ref().to_str()?.strip_prefix(DIRECTORIES_PREFIX)?;
                Some((name.to_string(), PathBuf::from(value.as_ref())))
            })
            .collect();
        declared.sort();

        let mut dirs = BTreeMap::new();
        dirs.insert(ROOT.to_string(), cwd.to_path_buf());

        for (name, value) in declared {
            if name == ROOT {
                warn!(
                    "Ignoring {}{}: '{}' is always the working directory",
                    DIRECTORIES_PREFIX, ROOT, ROOT
                );
                continue;
            }

            let path = absolutize(&value, cwd);
            if !path.is_dir() {
                return Err(ConfiguratorError::Path { name, path });
            }
            debug!(name = %name, path = %path.display(), "Resolved directory");
            dirs.insert(name, path);
        }

        Ok(Self { dirs })
    }

    /// Build a map containing only `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert(ROOT.to_string(), root.into());
        Self { dirs }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.dirs.get(name).map(PathBuf::as_path)
    }

    pub fn root(&self) -> &Path {
        // `root` is inserted by every constructor.
        self.dirs
            .get(ROOT)
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new("."))
    }

    /// The default configuration directory, if declared.
    pub fn etc(&self) -> Option<&Path> {
        self.get(ETC)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.dirs.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// JSON object view, as exposed to `${Path.<name>}` placeholders.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .dirs
            .iter()
            .map(|(name, path)| (name.clone(), Value::String(path_to_string(path))))
            .collect();
        Value::Object(map)
    }
}

/// The working directory as `root`, failing when it cannot be read.
fn working_dir(cwd: io::Result<PathBuf>) -> ConfigResult<PathBuf> {
    cwd.map_err(|err| {
        warn!(error = %err, "Unable to read the working directory");
        ConfiguratorError::Path {
            name: ROOT.to_string(),
            path: PathBuf::from("."),
        }
    })
}

/// Make `path` absolute against `base` and fold `.`/`..` components.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize_path_components(&joined)
}

/// Normalize a path by resolving `.` and `..` lexically.
fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else if !matches!(
                    components.last(),
                    Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    components.push(Component::ParentDir);
                }
            }
            other => components.push(other),
        }
    }

    components.iter().collect()
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn var(name: &str, value: &Path) -> (String, String) {
        (
            format!("{DIRECTORIES_PREFIX}{name}"),
            value.to_string_lossy().into_owned(),
        )
    }

    #[test]
    fn test_root_is_always_present() {
        let temp = TempDir::new().unwrap();
        let map = DirectoryMap::resolve_from(Vec::<(String, String)>::new(), temp.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.root(), temp.path());
        assert_eq!(map.get("root"), Some(temp.path()));
    }

    #[test]
    fn test_declared_directories_are_resolved() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("etc")).unwrap();
        std::fs::create_dir_all(temp.path().join("var/log")).unwrap();

        let vars = vec![
            (format!("{DIRECTORIES_PREFIX}etc"), "./etc".to_string()),
            (format!("{DIRECTORIES_PREFIX}logs"), "var/log/../log".to_string()),
            ("UNRELATED".to_string(), "./missing".to_string()),
        ];
        let map = DirectoryMap::resolve_from(vars, temp.path()).unwrap();

        assert_eq!(map.etc(), Some(temp.path().join("etc").as_path()));
        assert_eq!(map.get("logs"), Some(temp.path().join("var/log").as_path()));
        assert_eq!(map.root(), temp.path());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_missing_directory_fails_with_name_and_absolute_path() {
        let temp = TempDir::new().unwrap();
        let vars = vec![(
            format!("{DIRECTORIES_PREFIX}DELME"),
            "./notfound".to_string(),
        )];
        let err = DirectoryMap::resolve_from(vars, temp.path()).unwrap_err();
        assert_eq!(
            err,
            ConfiguratorError::Path {
                name: "DELME".into(),
                path: temp.path().join("notfound"),
            }
        );
    }

    #[test]
    fn test_regular_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.json");
        std::fs::write(&file, "{}").unwrap();

        let err = DirectoryMap::resolve_from(vec![var("file", &file)], temp.path()).unwrap_err();
        assert_eq!(err.kind(), "ConfiguratorPathError");
    }

    #[test]
    fn test_first_failure_in_key_order_wins() {
        let temp = TempDir::new().unwrap();
        let vars = vec![
            var("zeta", &temp.path().join("z")),
            var("alpha", &temp.path().join("a")),
        ];
        match DirectoryMap::resolve_from(vars, temp.path()) {
            Err(ConfiguratorError::Path { name, .. }) => assert_eq!(name, "alpha"),
            other => panic!("expected path error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_working_dir_is_a_root_path_error() {
        let err = working_dir(Err(io::Error::from(io::ErrorKind::NotFound))).unwrap_err();
        assert_eq!(
            err,
            ConfiguratorError::Path {
                name: "root".into(),
                path: PathBuf::from("."),
            }
        );
        assert_eq!(working_dir(Ok(PathBuf::from("/srv"))).unwrap(), PathBuf::from("/srv"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_accepted() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let temp = TempDir::new().unwrap();
        let vars = vec![
            (OsString::from_vec(b"UNRELATED_\xff".to_vec()), OsString::from("x")),
            (OsString::from("UNRELATED"), OsString::from_vec(b"\xff\xfe".to_vec())),
        ];
        let map = DirectoryMap::resolve_from(vars, temp.path()).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_root_declaration_cannot_override_cwd() {
        let temp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let map = DirectoryMap::resolve_from(vec![var("root", other.path())], temp.path()).unwrap();
        assert_eq!(map.root(), temp.path());
    }

    #[test]
    fn test_to_value_exposes_string_paths() {
        let map = DirectoryMap::with_root("/srv/app");
        assert_eq!(map.to_value(), serde_json::json!({"root": "/srv/app"}));
    }

    #[test]
    fn test_normalize_path_components() {
        assert_eq!(
            normalize_path_components(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path_components(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(
            normalize_path_components(Path::new("../a/./b")),
            PathBuf::from("../a/b")
        );
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize(Path::new("etc/../conf"), Path::new("/srv")),
            PathBuf::from("/srv/conf")
        );
        assert_eq!(
            absolutize(Path::new("/opt/conf"), Path::new("/srv")),
            PathBuf::from("/opt/conf")
        );
    }
}
