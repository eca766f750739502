//! File system utilities for staging.
//!
//! Every helper here is idempotent: re-running one after a partial or complete
//! earlier run converges on the same result.

use crate::{
    bail,
    framework::error::{Error, ErrorExt, Result},
};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Removes whatever is at `path`, recursively. Absence is not an error.
pub async fn remove_all(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("failed to inspect", path),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("failed to remove", path),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Removes a symbolic link without touching its target.
#[cfg(unix)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
}

/// Removes a symbolic link without touching its target.
#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Clears an entry left at `path` by an earlier copy.
///
/// Symlinks are always removed. Real files and directories are removed only when
/// `replace_all` is set; otherwise they are reused (files get overwritten, directories
/// get filled).
fn clear_existing(path: &Path, replace_all: bool) -> io::Result<()> {
    let file_type = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata.file_type(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let removed = if file_type.is_symlink() {
        remove_symlink(path)
    } else if !replace_all {
        return Ok(());
    } else if file_type.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match removed {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Copies the contents of directory `from` into directory `to`.
///
/// `to` is created if needed and becomes an ordinary directory holding copies
/// of every file. Symlinks inside the bundle (`Versions/Current`, `Headers`, ...)
/// are re-created with their original targets so the framework layout that
/// code signing validates is kept intact. Entries left in `to` by an earlier
/// copy are replaced, so the copy can be re-run over its own output.
///
/// Fails if `from` is not an existing directory.
pub async fn copy_dir_contents(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || -> Result<()> {
        std::fs::create_dir_all(&to).fs_context("failed to create directory", &to)?;

        for entry in walkdir::WalkDir::new(&from).min_depth(1) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("failed to read symlink", entry.path())?;
                clear_existing(&dest_path, true)
                    .fs_context("failed to replace existing entry", &dest_path)?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("failed to create symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                clear_existing(&dest_path, false)
                    .fs_context("failed to replace existing entry", &dest_path)?;
                std::fs::create_dir_all(&dest_path)
                    .fs_context("failed to create directory", &dest_path)?;
            } else {
                clear_existing(&dest_path, false)
                    .fs_context("failed to replace existing entry", &dest_path)?;
                std::fs::copy(entry.path(), &dest_path)
                    .fs_context("failed to copy file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {e}")))?
}
