// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{FsError, Result};

fn io_error(path: &Path, source: std::io::Error) -> FsError {
    FsError::IoError {
        path: path.display().to_string(),
        source,
    }
}

/// Removes a directory tree. Returns whether anything was removed.
///
/// # Errors
///
/// Returns `FsError::IoError` if the directory exists but cannot be removed.
pub async fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed directory");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e).into()),
    }
}

/// Removes a single file. Returns whether anything was removed.
///
/// # Errors
///
/// Returns `FsError::IoError` if the file exists but cannot be removed.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e).into()),
    }
}

/// Moves `staged` to `target`, replacing whatever was at `target`.
///
/// Both paths must live on the same filesystem.
///
/// # Errors
///
/// Returns `FsError` if `staged` is missing or the old target cannot be
/// removed, or the rename fails.
pub async fn replace_dir(staged: &Path, target: &Path) -> Result<()> {
    if !staged.exists() {
        return Err(FsError::NotFound(staged.display().to_string()).into());
    }
    remove_dir_if_exists(target).await?;
    fs::rename(staged, target)
        .await
        .map_err(|e| io_error(target, e))?;
    Ok(())
}
