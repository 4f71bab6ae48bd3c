use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::SystemError;

pub const PRIVATE_FILE_MODE: u32 = 0o600;
pub const PUBLIC_FILE_MODE: u32 = 0o644;

pub fn read(path: &Path) -> Result<Vec<u8>, SystemError> {
    fs::read(path).map_err(|e| SystemError::io("unable to read", path, e))
}

/// Content written next to its destination but not yet visible there.
///
/// Dropping a `StagedFile` without committing removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    destination: PathBuf,
}

impl StagedFile {
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Atomically replaces the destination with the staged content.
    pub fn commit(self) -> Result<PathBuf, SystemError> {
        let destination = self.destination;
        self.file
            .persist(&destination)
            .map_err(|e| SystemError::io("unable to write", &destination, e.error))?;
        Ok(destination)
    }
}

/// Writes `content` to a temporary file in the destination's directory.
///
/// An existing destination keeps its permissions; a new one gets `mode` on
/// unix.
pub fn stage(destination: &Path, content: &[u8], mode: u32) -> Result<StagedFile, SystemError> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| SystemError::io("unable to write", destination, e))?;

    file.write_all(content)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| SystemError::io("unable to write", destination, e))?;

    let permissions = match fs::metadata(destination) {
        Ok(existing) => existing.permissions(),
        Err(_) => permissions_for(mode, file.as_file())
            .map_err(|e| SystemError::io("unable to write", destination, e))?,
    };
    fs::set_permissions(file.path(), permissions)
        .map_err(|e| SystemError::io("unable to set permissions on", destination, e))?;

    Ok(StagedFile {
        file,
        destination: destination.to_path_buf(),
    })
}

pub fn write(destination: &Path, content: &[u8], mode: u32) -> Result<PathBuf, SystemError> {
    stage(destination, content, mode)?.commit()
}

#[cfg(unix)]
fn permissions_for(mode: u32, _file: &fs::File) -> std::io::Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn permissions_for(_mode: u32, file: &fs::File) -> std::io::Result<fs::Permissions> {
    Ok(file.metadata()?.permissions())
}
