//! Discovery and management of the `.formsmith/` project directory.
//!
//! The directory holds the project's `config.yaml`. It is found by walking
//! up from the working directory, like `.git/`.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the project directory.
pub const PROJECT_DIR_NAME: &str = ".formsmith";

/// Environment variable that overrides discovery.
pub const PROJECT_DIR_ENV: &str = "FORMSMITH_DIR";

/// Walk up the directory tree from `start` looking for a `.formsmith/`
/// directory.
///
/// `FORMSMITH_DIR` is checked first and wins when it names an existing
/// directory. Returns `None` when the filesystem root is reached.
///
/// # Examples
///
/// ```no_run
/// use formsmith_config::project_dir::find_project_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_project_dir(Path::new(".")) {
///     println!("Found project dir at {}", dir.display());
/// }
/// ```
pub fn find_project_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(PROJECT_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_project_dir`], but a miss is an error.
///
/// # Errors
///
/// Returns [`ConfigError::ProjectDirNotFound`] if no `.formsmith/` directory
/// is found.
pub fn find_project_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_project_dir(start).ok_or(ConfigError::ProjectDirNotFound)
}

/// Ensure a `.formsmith/` directory exists at the given path.
///
/// If `path` is not itself called `.formsmith`, a `.formsmith/` subdirectory
/// is created under it. Returns the project directory.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if directory creation fails.
pub fn ensure_project_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(PROJECT_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(PROJECT_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_project_dir_in_temp() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(PROJECT_DIR_NAME);
        std::fs::create_dir(&project).unwrap();

        let found = find_project_dir(dir.path()).unwrap();
        // Canonicalize both for comparison (/tmp vs /private/tmp).
        assert_eq!(found.canonicalize().unwrap(), project.canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_dir_in_child() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(PROJECT_DIR_NAME);
        std::fs::create_dir(&project).unwrap();

        let child = dir.path().join("forms").join("drafts");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_project_dir(&child).unwrap();
        assert_eq!(found.canonicalize().unwrap(), project.canonicalize().unwrap());
    }

    #[test]
    fn test_missing_start_is_none() {
        assert!(find_project_dir(Path::new("/nonexistent/start/dir")).is_none());
    }

    #[test]
    fn test_find_project_dir_or_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(PROJECT_DIR_NAME)).unwrap();
        assert!(find_project_dir_or_error(dir.path()).is_ok());
    }

    #[test]
    fn test_ensure_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_project_dir(dir.path()).unwrap();
        assert!(first.is_dir());
        assert!(first.ends_with(PROJECT_DIR_NAME));

        let again = ensure_project_dir(&first).unwrap();
        assert_eq!(first, again);
    }
}
