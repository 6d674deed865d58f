// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Make tool for compiling a configured tree.
//!
//! ```text
//! MakeTool
//! Operations: Build | Install
//! Build:   cd <dir> && make -j <jobs>
//! Install: cd <dir> && make -j <jobs> install
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;

/// Make operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MakeOperation {
    /// Build the default target.
    #[default]
    Build,
    /// Build and run the `install` target.
    Install,
}

/// Make tool. The job count is the configured `build_jobs`.
#[derive(Debug, Clone, Default)]
pub struct MakeTool {
    dir: Option<PathBuf>,
    operation: MakeOperation,
}

impl MakeTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dir: None,
            operation: MakeOperation::Build,
        }
    }

    #[must_use]
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn build_op(mut self) -> Self {
        self.operation = MakeOperation::Build;
        self
    }

    #[must_use]
    pub const fn install_op(mut self) -> Self {
        self.operation = MakeOperation::Install;
        self
    }

    fn make_args(&self, jobs: u32) -> Vec<String> {
        let mut args = vec!["-j".to_string(), jobs.to_string()];
        if self.operation == MakeOperation::Install {
            args.push("install".to_string());
        }
        args
    }

    async fn do_make(&self, ctx: &ToolContext) -> Result<()> {
        let dir = self
            .dir
            .as_deref()
            .context("MakeTool: dir is required")?;
        let args = self.make_args(ctx.settings().build_jobs);

        if ctx.is_dry_run() {
            info!(
                dir = %dir.display(),
                args = %args.join(" "),
                "[dry-run] Would run make"
            );
            return Ok(());
        }

        let builder =
            ProcessBuilder::configured_or_which(ctx.settings().tools.make.as_deref(), "make")
                .context("make executable not found")?
                .args(&args)
                .cwd(dir)
                .echo_output(true);

        debug!(dir = %dir.display(), operation = ?self.operation, "Running make");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to compile {}", dir.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("make was interrupted");
        }

        info!(dir = %dir.display(), operation = ?self.operation, "make completed");
        Ok(())
    }
}

impl Tool for MakeTool {
    fn name(&self) -> &'static str {
        "make"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_make(ctx))
    }
}

#[cfg(test)]
mod tests;
