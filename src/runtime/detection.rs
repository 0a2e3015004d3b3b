// ABOUTME: Runtime executable detection on the local system.
// ABOUTME: Scans PATH for the configured runtime's CLI binary.

use super::types::RuntimeType;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("{0} not found on PATH")]
    NoRuntimeFound(RuntimeType),
}

/// Locate the runtime executable on the current process `PATH`.
pub fn detect_local(runtime: RuntimeType) -> Result<PathBuf, DetectionError> {
    let path_var = std::env::var_os("PATH");
    find_in_path(runtime, path_var.as_deref())
}

/// Locate the runtime executable in an explicit `PATH`-style search list.
///
/// Entries are checked in order; the first executable regular file named
/// after the runtime wins.
pub fn find_in_path(
    runtime: RuntimeType,
    path_var: Option<&OsStr>,
) -> Result<PathBuf, DetectionError> {
    let Some(path_var) = path_var else {
        return Err(DetectionError::NoRuntimeFound(runtime));
    };

    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(runtime.binary()))
        .find(|candidate| is_executable(candidate))
        .ok_or(DetectionError::NoRuntimeFound(runtime))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_binary(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn finds_first_executable_match() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_binary(second.path(), "podman", 0o755);

        let search = std::env::join_paths([first.path(), second.path()]).unwrap();
        let found = find_in_path(RuntimeType::Podman, Some(&search)).unwrap();
        assert_eq!(found, second.path().join("podman"));
    }

    #[test]
    fn skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        write_binary(dir.path(), "docker", 0o644);

        let result = find_in_path(RuntimeType::Docker, Some(dir.path().as_os_str()));
        assert!(matches!(
            result,
            Err(DetectionError::NoRuntimeFound(RuntimeType::Docker))
        ));
    }

    #[test]
    fn missing_path_is_not_found() {
        assert!(find_in_path(RuntimeType::Podman, None).is_err());
    }
}
