use std::path::{Path, PathBuf};

use crate::error::SystemError;

/// Extension rules for a family of target files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPolicy {
    /// Appended when the user gives no extension. Without the leading dot.
    pub canonical: &'static str,
    pub accepted: &'static [&'static str],
}

impl PathPolicy {
    pub const PEM: PathPolicy = PathPolicy {
        canonical: "pem",
        accepted: &["pem"],
    };

    pub const MANIFEST: PathPolicy = PathPolicy {
        canonical: "yaml",
        accepted: &["yml", "yaml"],
    };

    fn describe(&self) -> String {
        self.accepted
            .iter()
            .map(|e| format!("*.{e}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// An absolute path whose extension satisfies a [`PathPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
    path: PathBuf,
    extension: &'static str,
}

impl TargetPath {
    /// Applies the extension policy to an already-absolute path. Touches no
    /// filesystem state.
    pub fn normalize(absolute: PathBuf, policy: &PathPolicy) -> Result<TargetPath, SystemError> {
        if absolute.file_name().is_none() {
            return Err(SystemError::path(format!(
                "invalid target path: {}",
                absolute.display()
            )));
        }

        let Some(extension) = absolute.extension() else {
            let mut path = absolute.into_os_string();
            path.push(".");
            path.push(policy.canonical);
            return Ok(TargetPath {
                path: PathBuf::from(path),
                extension: policy.canonical,
            });
        };

        let extension = extension.to_string_lossy().into_owned();
        match policy.accepted.iter().find(|e| **e == extension) {
            Some(accepted) => Ok(TargetPath {
                path: absolute,
                extension: *accepted,
            }),
            None => Err(SystemError::path(format!(
                "unsupported file extension (\".{extension}\"): must be {} or unspecified",
                policy.describe()
            ))),
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// The path with its extension removed, e.g. `/keys/test` for
    /// `/keys/test.pem`.
    pub fn stem_path(&self) -> PathBuf {
        self.path.with_extension("")
    }

    /// `<stem>.<infix>.<extension>`.
    pub fn sibling(&self, infix: &str) -> PathBuf {
        let mut path = self.stem_path().into_os_string();
        path.push(format!(".{infix}.{}", self.extension));
        PathBuf::from(path)
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}
