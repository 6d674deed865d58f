// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only git queries.
//!
//! ```text
//! query --> gix::open --> <tree>/.git (no subprocess)
//! ```
//!
//! Cloning and checking out go through the git CLI (`tools::git`); this
//! module only inspects the result. Repositories are opened exactly at the
//! given path, never discovered upwards, so a copied tree without `.git`
//! is not mistaken for the enclosing project's repository.


use std::path::Path;

use crate::error::{DatatybeResult, GitError};

/// Returns whether `path` is the root of a git repository.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    gix::open(path).is_ok()
}

/// Resolves the commit HEAD points at.
///
/// Returns `Ok(None)` for a repository without commits.
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be
/// read.
pub fn head_commit(path: &Path) -> DatatybeResult<Option<String>> {
    let repo = gix::open(path).map_err(|e| GitError::Open {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;
    let head = repo.head().map_err(|e| GitError::Head {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(head.id().map(|id| id.to_string()))
}
