// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! datatybe [global options] <command>
//! clone      [--git URL] [--sha1 REV]
//! configure  [clone flags] [--synctype T] [--compilertype C]
//!            [--rdtscp] [--cpufreq MHZ] [--clean] [--clone]
//! compile
//! all        union of clone and configure flags
//! options
//! status
//! ```

pub mod build;
pub mod global;


use crate::cli::build::{AllArgs, CloneArgs, ConfigureArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// MPI-datatybe Build Orchestrator
///
/// Clones ReproMPI, generates the datatype benchmarks and builds both trees.
#[derive(Debug, Parser)]
#[command(
    name = "datatybe",
    author,
    version,
    about = "MPI-datatybe builder",
    long_about = "datatybe-build Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Clones the ReproMPI benchmark, generates the MPI datatype\n\
                  benchmarks from src/ and builds both with CMake and make.\n\
                  Run `datatybe all` for a full build, or `clone`, `configure`\n\
                  and `compile` one after another.",
    after_help = "See \"config/build.conf\" for the full list of default configuration settings.\n\
                  Any key can be overridden with DATATYBE_<KEY> or --set key=value."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clones ReproMPI benchmark code.
    Clone(CloneArgs),

    /// Generates code and configures the build.
    Configure(ConfigureArgs),

    /// Compiles the code.
    Compile,

    /// Clones, configures and compiles.
    All(AllArgs),

    /// Lists all options and their values after layering.
    Options,

    /// Shows the recorded build stage and which directories exist.
    Status,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
