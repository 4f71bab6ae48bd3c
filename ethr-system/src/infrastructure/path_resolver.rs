use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::target_path::{PathPolicy, TargetPath};
use crate::error::SystemError;

/// Resolves user-supplied paths against a working directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    cwd: PathBuf,
}

impl PathResolver {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn from_current_dir() -> Result<Self, SystemError> {
        let cwd = std::env::current_dir()
            .map_err(|e| SystemError::io("unable to get current working directory", ".", e))?;
        Ok(Self::new(cwd))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Turns `input` into an absolute [`TargetPath`] that satisfies `policy`.
    ///
    /// The extension is checked before anything touches the filesystem. A
    /// missing parent directory is an error unless `create_dirs` is set, in
    /// which case every missing segment is created.
    pub fn resolve(
        &self,
        input: &str,
        policy: &PathPolicy,
        create_dirs: bool,
    ) -> Result<TargetPath, SystemError> {
        if input.trim().is_empty() {
            return Err(SystemError::path("path must not be empty"));
        }

        let candidate = Path::new(input);
        let absolute = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.cwd.join(candidate)
        };

        let target = TargetPath::normalize(absolute, policy)?;

        if let Some(dir) = target.parent() {
            if !dir.exists() {
                if !create_dirs {
                    return Err(SystemError::path(format!(
                        "directory does not exist: {}",
                        dir.display()
                    )));
                }

                create_dir_all(dir)?;
                tracing::debug!(directory = %dir.display(), "created missing directories");
            }
        }

        tracing::debug!(
            path = %target.as_path().display(),
            extension = target.extension(),
            "resolved target path"
        );

        Ok(target)
    }
}

/// Fails unless `target` names an existing file.
pub fn require_existing(target: &TargetPath) -> Result<(), SystemError> {
    if target.as_path().is_file() {
        Ok(())
    } else {
        Err(SystemError::path(format!(
            "file does not exist: {}",
            target.as_path().display()
        )))
    }
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> Result<(), SystemError> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(dir)
        .map_err(|e| SystemError::io("unable to create directory", dir, e))
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> Result<(), SystemError> {
    fs::create_dir_all(dir).map_err(|e| SystemError::io("unable to create directory", dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_path_without_extension_gets_canonical_one() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());

        let target = resolver.resolve("test", &PathPolicy::PEM, false).unwrap();
        assert_eq!(target.as_path(), dir.path().join("test.pem"));
    }

    #[test]
    fn absolute_path_is_used_verbatim() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new("/somewhere/else");
        let input = dir.path().join("kustomization.yml");

        let target = resolver
            .resolve(input.to_str().unwrap(), &PathPolicy::MANIFEST, false)
            .unwrap();
        assert_eq!(target.as_path(), input);
    }

    #[test]
    fn wrong_extension_fails_before_touching_disk() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());

        let result = resolver.resolve("missing/nested/x.txt", &PathPolicy::MANIFEST, true);
        assert!(matches!(result, Err(SystemError::Path(_))));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn manifest_txt_extension_is_rejected() {
        let resolver = PathResolver::new("/");
        let result = resolver.resolve("/tmp/x.txt", &PathPolicy::MANIFEST, false);

        let error = result.unwrap_err();
        assert!(error.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn missing_directory_without_mkdir_fails() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());

        let error = resolver
            .resolve("keys/service.pem", &PathPolicy::PEM, false)
            .unwrap_err();
        assert!(error.to_string().starts_with("directory does not exist"));
    }

    #[test]
    fn missing_directory_with_mkdir_is_created() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());

        let target = resolver
            .resolve("keys/nested/service.pem", &PathPolicy::PEM, true)
            .unwrap();

        assert!(dir.path().join("keys/nested").is_dir());
        assert_eq!(target.as_path(), dir.path().join("keys/nested/service.pem"));
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_are_owner_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());
        resolver.resolve("keys/service", &PathPolicy::PEM, true).unwrap();

        let mode = fs::metadata(dir.path().join("keys")).unwrap().permissions().mode();
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn empty_input_is_rejected() {
        let resolver = PathResolver::new("/");
        assert!(matches!(
            resolver.resolve("  ", &PathPolicy::PEM, true),
            Err(SystemError::Path(_))
        ));
    }

    #[test]
    fn require_existing_reports_missing_file() {
        let dir = tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path());
        let target = resolver
            .resolve("kustomization.yaml", &PathPolicy::MANIFEST, false)
            .unwrap();

        let error = require_existing(&target).unwrap_err();
        assert!(error.to_string().starts_with("file does not exist"));

        fs::write(target.as_path(), "kind: Kustomization\n").unwrap();
        assert!(require_existing(&target).is_ok());
    }
}
