// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Obtains the ReproMPI source tree.
//!
//! ```text
//! acquire(ctx, layout)
//!   mkdir -p <build_dir>
//!   stage = <build_dir>/.acquire-XXXX/<name>
//!     |
//!     +--> git clone --no-checkout <locator> <stage>
//!     |    git checkout <revision>                    --> method: git
//!     |
//!     +--> (any failure) locator is a local dir?
//!            yes: copy <locator> --> <stage>         --> method: copy
//!            no:  AcquireError::Failed
//!     |
//!   replace <build_dir>/<name> with <stage>
//!   resolve HEAD (gix)
//! ```
//!
//! Nothing outside the staging directory is touched until a tree has been
//! obtained, so a failed acquisition keeps the previous tree and never leaves
//! a partial one behind.


use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::config::resolve;
use crate::error::{AcquireError, FsError, Result};
use crate::git::{head_commit, is_git_repo};
use crate::layout::BuildLayout;
use crate::state::AcquireMethod;
use crate::tools::git::GitTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::copy::copy_dir_contents_async;
use crate::utility::fs::remove::{remove_dir_if_exists, replace_dir};

/// Prefix of the staging directory created inside the build directory.
pub const STAGING_PREFIX: &str = ".acquire-";

/// Result of a successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub method: AcquireMethod,
    /// Location of the acquired tree.
    pub path: PathBuf,
    /// HEAD commit of the acquired tree, when it is a git repository.
    pub head: Option<String>,
}

/// Existing local directory the locator points at, if any.
///
/// Relative locators are resolved against the project root.
#[must_use]
pub fn local_source(root: &Path, locator: &str) -> Option<PathBuf> {
    let path = resolve(root, Path::new(locator));
    path.is_dir().then_some(path)
}

/// Clones `locator` into `dest` and checks out `revision`.
async fn clone_and_checkout(
    ctx: &ToolContext,
    locator: &str,
    revision: &str,
    dest: &Path,
) -> Result<()> {
    GitTool::new()
        .url(locator)
        .path(dest)
        .no_checkout(true)
        .clone_op()
        .run(ctx)
        .await?;
    GitTool::new()
        .path(dest)
        .target(revision)
        .checkout_op()
        .run(ctx)
        .await
}

/// Obtains the source tree described by the settings and places it at
/// `layout.source_tree()`, replacing any previous tree.
///
/// # Errors
///
/// Returns `AcquireError::Failed` if neither cloning nor a local copy
/// produced a tree, or an `FsError` if the build directory cannot be
/// prepared.
pub async fn acquire(ctx: &ToolContext, layout: &BuildLayout) -> Result<Acquisition> {
    let settings = ctx.settings();
    let locator = settings.reprompi_locator.as_str();
    let revision = settings.reprompi_revision.as_str();
    let target = layout.source_tree();
    let local = local_source(layout.root(), locator);
    let clone_url = local
        .as_ref()
        .map_or_else(|| locator.to_string(), |p| p.display().to_string());

    if ctx.is_dry_run() {
        info!(build_dir = %layout.build_dir().display(), "[dry-run] Would create build directory");
        if target.exists() {
            info!(path = %target.display(), "[dry-run] Would replace existing tree");
        }
        clone_and_checkout(ctx, &clone_url, revision, &target).await?;
        return Ok(Acquisition {
            method: AcquireMethod::Git,
            path: target,
            head: None,
        });
    }

    tokio::fs::create_dir_all(layout.build_dir())
        .await
        .map_err(|source| FsError::IoError {
            path: layout.build_dir().display().to_string(),
            source,
        })?;

    let stage = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(layout.build_dir())
        .map_err(|source| FsError::IoError {
            path: layout.build_dir().display().to_string(),
            source,
        })?;
    let staged = stage.path().join(layout.source_name());

    let method = match clone_and_checkout(ctx, &clone_url, revision, &staged).await {
        Ok(()) => AcquireMethod::Git,
        Err(clone_err) => {
            if ctx.is_cancelled() {
                return Err(clone_err);
            }
            warn!(error = %format!("{clone_err:#}"), "Clone failed");
            let Some(source) = local else {
                return Err(clone_err.context(AcquireError::Failed {
                    locator: locator.to_string(),
                }));
            };

            info!(from = %source.display(), "Trying to copy code");

            remove_dir_if_exists(&staged).await?;
            copy_dir_contents_async(&source, &staged)
                .await
                .context(AcquireError::Failed {
                    locator: locator.to_string(),
                })?;

            warn!(
                revision = %revision,
                "Copied a local tree; the requested revision was not applied"
            );
            AcquireMethod::Copy
        }
    };

    if target.exists() {
        info!(path = %target.display(), "Removing existing ReproMPI code directory");
    }
    replace_dir(&staged, &target)
        .await
        .with_context(|| format!("failed to move acquired tree to {}", target.display()))?;

    // A copied tree may or may not be a repository of its own.
    let head = if is_git_repo(&target) {
        head_commit(&target).unwrap_or_else(|e| {
            warn!(error = %e, "Could not resolve HEAD of the acquired tree");
            None
        })
    } else {
        None
    };

    info!(
        path = %target.display(),
        method = %method,
        head = head.as_deref().unwrap_or("-"),
        "ReproMPI code acquired"
    );

    Ok(Acquisition {
        method,
        path: target,
        head,
    })
}
