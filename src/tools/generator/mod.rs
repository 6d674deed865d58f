// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Invokes the datatype benchmark code generator shipped with ReproMPI.
//!
//! ```text
//! cd <root> && <tree>/<script> -d <bench> -o <build>/<gen> -l <list>
//! ```
//!
//! The generator is opaque: success is its exit code alone.

use std::path::{Path, PathBuf};

use crate::error::{AcquireError, Result};
use anyhow::Context;
use tracing::{debug, info, warn};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Default)]
pub struct GeneratorTool {
    script: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    source_list: Option<PathBuf>,
    cwd: Option<PathBuf>,
}

impl GeneratorTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            script: None,
            source_dir: None,
            output_dir: None,
            source_list: None,
            cwd: None,
        }
    }

    #[must_use]
    pub fn script(mut self, path: impl AsRef<Path>) -> Self {
        self.script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory of the sources the benchmarks are generated from (`-d`).
    #[must_use]
    pub fn source_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory receiving the generated tree (`-o`).
    #[must_use]
    pub fn output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// List-of-source-files artifact (`-l`).
    #[must_use]
    pub fn source_list(mut self, path: impl AsRef<Path>) -> Self {
        self.source_list = Some(path.as_ref().to_path_buf());
        self
    }

    /// Working directory for the script (the project root).
    #[must_use]
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    fn script_required(&self) -> Result<&Path> {
        self.script
            .as_deref()
            .context("GeneratorTool: script is required")
    }

    fn generator_args(&self) -> Result<Vec<String>> {
        let required = |value: &Option<PathBuf>, what: &str| {
            value
                .as_deref()
                .map(|p| p.display().to_string())
                .with_context(|| format!("GeneratorTool: {what} is required"))
        };
        Ok(vec![
            "-d".to_string(),
            required(&self.source_dir, "source_dir")?,
            "-o".to_string(),
            required(&self.output_dir, "output_dir")?,
            "-l".to_string(),
            required(&self.source_list, "source_list")?,
        ])
    }

    async fn do_generate(&self, ctx: &ToolContext) -> Result<()> {
        let script = self.script_required()?;
        let args = self.generator_args()?;

        if ctx.is_dry_run() {
            if !script.exists() {
                warn!(script = %script.display(), "Code generator not present yet");
            }
            info!(
                script = %script.display(),
                args = %args.join(" "),
                "[dry-run] Would generate benchmark code"
            );
            return Ok(());
        }

        if !script.is_file() {
            return Err(AcquireError::GeneratorMissing {
                path: script.display().to_string(),
            }
            .into());
        }

        let mut builder = ProcessBuilder::new(script)
            .name("generator")
            .args(&args)
            .echo_output(true);
        if let Some(cwd) = &self.cwd {
            builder = builder.cwd(cwd);
        }

        debug!(script = %script.display(), "Generating benchmark code");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Code generator {} failed", script.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Code generation was interrupted");
        }

        info!(output = ?self.output_dir, "Benchmark code generated");
        Ok(())
    }
}

impl Tool for GeneratorTool {
    fn name(&self) -> &'static str {
        "generator"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_generate(ctx))
    }
}
