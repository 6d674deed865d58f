// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for acquiring the ReproMPI tree.
//!
//! ```text
//! GitTool
//! Operations: Clone | Checkout
//! Builder: url/path/target/no_checkout
//! Clone:    git clone [--no-checkout] <url> <path>
//! Checkout: git -c advice.detachedHead=false checkout -q <target>   (cwd: path)
//! ```
//!
//! Mutating operations shell out to the git CLI through
//! `ProcessBuilder::run_with_cancellation()`. For read-only queries (HEAD
//! commit), use `crate::git`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Clone a repository.
    #[default]
    Clone,
    /// Checkout a branch, tag, or commit.
    Checkout,
}

/// Git tool for clone and checkout.
///
/// # Example
///
/// ```ignore
/// GitTool::new()
///     .url("https://github.com/hunsa/reprompi.git")
///     .path("/tmp/b/reprompi")
///     .no_checkout(true)
///     .run(&ctx)
///     .await?;
///
/// GitTool::new()
///     .path("/tmp/b/reprompi")
///     .target("deadbeef")
///     .checkout_op()
///     .run(&ctx)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GitTool {
    url: Option<String>,
    path: Option<PathBuf>,
    target: Option<String>,
    no_checkout: bool,
    operation: GitOperation,
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}

impl GitTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            url: None,
            path: None,
            target: None,
            no_checkout: false,
            operation: GitOperation::Clone,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Clone without populating the working tree.
    #[must_use]
    pub const fn no_checkout(mut self, no_checkout: bool) -> Self {
        self.no_checkout = no_checkout;
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    fn git_builder(ctx: &ToolContext) -> Result<ProcessBuilder> {
        ProcessBuilder::configured_or_which(ctx.settings().tools.git.as_deref(), "git")
            .context("git executable not found")
    }

    /// Arguments of the clone invocation.
    fn clone_args(&self, url: &str, path: &Path) -> Vec<String> {
        let mut args = vec!["clone".to_string()];
        if self.no_checkout {
            args.push("--no-checkout".to_string());
        }
        args.push(url.to_string());
        args.push(path.display().to_string());
        args
    }

    async fn do_clone(&self, ctx: &ToolContext) -> Result<()> {
        let url = self
            .url
            .as_ref()
            .context("GitTool: url is required for clone")?;
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for clone")?;

        if ctx.is_dry_run() {
            info!(
                url = %url,
                path = %path.display(),
                no_checkout = self.no_checkout,
                "[dry-run] Would clone repository"
            );
            return Ok(());
        }

        let builder = Self::git_builder(ctx)?.args(self.clone_args(url, path));

        debug!(url = %url, path = %path.display(), "Cloning repository");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to clone {url}"))?;

        if output.is_interrupted() {
            anyhow::bail!("Git clone was interrupted");
        }

        info!(url = %url, path = %path.display(), "Repository cloned");
        Ok(())
    }

    async fn do_checkout(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for checkout")?;
        let target = self
            .target
            .as_ref()
            .context("GitTool: target is required for checkout")?;

        if ctx.is_dry_run() {
            info!(path = %path.display(), target = %target, "[dry-run] Would checkout");
            return Ok(());
        }

        let builder = Self::git_builder(ctx)?
            .arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg("-q")
            .arg(target)
            .cwd(path)
            .echo_output(true);

        debug!(path = %path.display(), target = %target, "Checking out");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to checkout {} in {}", target, path.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Git checkout was interrupted");
        }

        info!(path = %path.display(), target = %target, "Checked out");
        Ok(())
    }
}

impl Tool for GitTool {
    fn name(&self) -> &'static str {
        "git"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                GitOperation::Clone => self.do_clone(ctx).await,
                GitOperation::Checkout => self.do_checkout(ctx).await,
            }
        })
    }
}
