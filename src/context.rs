//! Process snapshot shared by configuration calls.

use crate::env::Environment;
use crate::error::ConfigResult;
use crate::paths::DirectoryMap;

/// Directories and environment captured once at startup.
///
/// Built by the host application and passed by reference into every
/// [`Configurator`](crate::config::Configurator) call; nothing is read from
/// ambient process state while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    paths: DirectoryMap,
    env: Environment,
}

impl Context {
    pub fn new(paths: DirectoryMap, env: Environment) -> Self {
        Self { paths, env }
    }

    /// Snapshot the current process environment and working directory.
    pub fn from_process() -> ConfigResult<Self> {
        Ok(Self {
            paths: DirectoryMap::resolve()?,
            env: Environment::resolve(),
        })
    }

    pub fn paths(&self) -> &DirectoryMap {
        &self.paths
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ENV_VAR;
    use crate::paths::DIRECTORIES_PREFIX;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_from_process_snapshots_environment() {
        let temp = TempDir::new().unwrap();
        let etc_var = format!("{DIRECTORIES_PREFIX}etc");
        temp_env::with_vars(
            [
                (ENV_VAR, Some("RESETME")),
                (etc_var.as_str(), Some(temp.path().to_str().unwrap())),
            ],
            || {
                let context = Context::from_process().unwrap();
                assert_eq!(context.env().as_str(), "RESETME");
                assert_eq!(context.paths().etc(), Some(temp.path()));
                assert_eq!(
                    context.paths().root(),
                    std::env::current_dir().unwrap().as_path()
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_process_fails_on_missing_directory() {
        let var = format!("{DIRECTORIES_PREFIX}DELME");
        temp_env::with_var(&var, Some("./notfound"), || {
            let err = Context::from_process().unwrap_err();
            assert_eq!(err.kind(), "ConfiguratorPathError");
        });
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_from_process_tolerates_non_utf8_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let value = OsStr::from_bytes(b"\xff\xfe");
        temp_env::with_var("CONFIGURATOR_TEST_UNRELATED", Some(value), || {
            let context = Context::from_process().unwrap();
            assert!(context.paths().get("TEST_UNRELATED").is_none());
        });
    }
}
