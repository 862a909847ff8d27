//! Filesystem collaborators for the batch engine

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use arx_core::{ArxError, ArxResult};

/// Open an existing regular file for reading.
///
/// Paths containing parent-directory components are rejected before any
/// filesystem access, so a caller-supplied mapping cannot climb out of the
/// directories it names.
pub fn open_source(path: &Path) -> ArxResult<File> {
    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(ArxError::Validation(format!(
            "source path `{}` contains a parent-directory component",
            path.display()
        )));
    }

    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(ArxError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{}` is not a regular file", path.display()),
        )));
    }

    Ok(File::open(path)?)
}

/// Create the destination file, replacing any existing one.
///
/// Ensures the parent directory tree exists and removes a pre-existing file
/// first (last-writer-wins). Not atomic: a crash mid-write leaves a partial
/// destination.
pub fn prepare_destination(path: &Path) -> ArxResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(ArxError::Io(err)),
    }

    Ok(File::create(path)?)
}
