// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← key = value file (default: <root>/config/build.conf)
//! --root DIR        ← project root (default: current directory)
//! --set KEY=VAL     ← direct config override (can repeat)
//! --dry             ← log what would run, change nothing
//! --log-level N     ← console verbosity (0-6)
//! --log-file FILE   ← also log to FILE
//!
//! Precedence: --git/--sha1 > --set > DATATYBE_* > config file
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Project root containing src/ and config/. Relative paths in the
    /// configuration resolve against it.
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Sets an option, such as 'build_dir=/scratch/build'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append, global = true)]
    pub options: Vec<String>,

    /// Logs the commands that would run without running them or touching
    /// the filesystem.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Project root: `--root`, otherwise `cwd`.
    #[must_use]
    pub fn project_root(&self, cwd: &Path) -> PathBuf {
        self.root
            .as_ref()
            .map_or_else(|| cwd.to_path_buf(), |root| cwd.join(root))
    }

    /// Configuration file: `--config` (relative to `cwd`), otherwise
    /// `<root>/config/build.conf`.
    #[must_use]
    pub fn config_file(&self, cwd: &Path) -> PathBuf {
        self.config.as_ref().map_or_else(
            || self.project_root(cwd).join(DEFAULT_CONFIG_FILE),
            |path| cwd.join(path),
        )
    }
}
