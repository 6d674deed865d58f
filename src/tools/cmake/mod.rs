// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CMake` tool for configuring a build tree.
//!
//! ```text
//! CmakeTool
//! Builder: source_dir/build_dir/options
//!
//! configure:
//!   rm <build>/CMakeCache.txt, rm -r <build>/CMakeFiles
//!   cd <build> && cmake <options...> <source>
//! ```
//!
//! The build directory defaults to the source directory (in-tree build),
//! which is how both trees are configured.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::options::CmakeOptions;
use crate::utility::fs::remove::{remove_dir_if_exists, remove_file_if_exists};

/// Cache file removed before every configure.
pub const CACHE_FILE: &str = "CMakeCache.txt";
/// Cache directory removed before every configure.
pub const CACHE_DIR: &str = "CMakeFiles";

/// `CMake` configure tool.
#[derive(Debug, Clone)]
pub struct CmakeTool {
    source_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    options: CmakeOptions,
}

impl Default for CmakeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CmakeTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source_dir: None,
            build_dir: None,
            options: CmakeOptions::new(),
        }
    }

    #[must_use]
    pub fn source_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build directory; defaults to the source directory.
    #[must_use]
    pub fn build_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn options(mut self, options: CmakeOptions) -> Self {
        self.options = options;
        self
    }

    fn source_dir_required(&self) -> Result<&Path> {
        self.source_dir
            .as_deref()
            .context("CmakeTool: source_dir is required")
    }

    /// Effective build directory.
    fn effective_build_dir(&self) -> Result<&Path> {
        match self.build_dir.as_deref() {
            Some(dir) => Ok(dir),
            None => self.source_dir_required(),
        }
    }

    /// Arguments passed to cmake: options first, then the source directory.
    fn configure_args(&self) -> Result<Vec<String>> {
        let mut args = self.options.to_args();
        args.push(self.source_dir_required()?.display().to_string());
        Ok(args)
    }

    async fn clear_cmake_cache(build: &Path) -> Result<()> {
        let cache_file = build.join(CACHE_FILE);
        if remove_file_if_exists(&cache_file).await? {
            info!(path = %cache_file.display(), "Removed");
        }
        let cache_dir = build.join(CACHE_DIR);
        if remove_dir_if_exists(&cache_dir).await? {
            info!(path = %cache_dir.display(), "Removed");
        }
        Ok(())
    }

    async fn do_configure(&self, ctx: &ToolContext) -> Result<()> {
        let build = self.effective_build_dir()?;
        let args = self.configure_args()?;

        if ctx.is_dry_run() {
            info!(
                build = %build.display(),
                args = %args.join(" "),
                "[dry-run] Would configure CMake"
            );
            return Ok(());
        }

        Self::clear_cmake_cache(build).await?;

        let builder =
            ProcessBuilder::configured_or_which(ctx.settings().tools.cmake.as_deref(), "cmake")
                .context("cmake executable not found")?
                .args(&args)
                .cwd(build)
                .echo_output(true);

        debug!(build = %build.display(), "Configuring CMake");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to configure {}", build.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("CMake configure was interrupted");
        }

        info!(build = %build.display(), "CMake configure completed");
        Ok(())
    }
}

impl Tool for CmakeTool {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_configure(ctx))
    }
}

#[cfg(test)]
mod tests;
