// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed CMake options for the two build trees.
//!
//! # Accumulation Order
//!
//! ```text
//! ReproMPI tree                       generated tree
//! -------------                       --------------
//!                                     REPRO_MPI_BENCHMARK_DIR=<tree>
//! reprompi_default_cmake_options      mpidatatybe_default_cmake_options
//! reprompi_cmake_options              mpidatatybe_cmake_options
//! --rdtscp / --cpufreq                --compilertype
//! --synctype
//! --compilertype
//! ```
//!
//! A later `-D` with the same name replaces the earlier one, so command-line
//! choices win over the configuration file.
//!
//! # Synchronization Flags
//!
//! ```text
//! --synctype             BARRIER  HCA  JK  SK
//! mpi_barrier              OFF    OFF  OFF OFF
//! dissemination_barrier    ON     OFF  OFF OFF
//! hca                      OFF    ON   OFF OFF
//! jk                       OFF    OFF  ON  OFF
//! skampi                   OFF    OFF  OFF ON
//! ```


use std::fmt;
use std::path::Path;

use clap::ValueEnum;

/// Define naming the acquired tree for the generated build.
pub const REPRO_MPI_BENCHMARK_DIR: &str = "REPRO_MPI_BENCHMARK_DIR";
pub const ENABLE_RDTSCP: &str = "ENABLE_RDTSCP";
pub const FREQUENCY_MHZ: &str = "FREQUENCY_MHZ";
pub const INCLUDE_PLATFORM_CONFIG_FILE: &str = "INCLUDE_PLATFORM_CONFIG_FILE";

/// The mutually exclusive synchronization switches, in argument order.
pub const SYNC_FLAGS: [&str; 4] = [
    "ENABLE_BENCHMARK_BARRIER",
    "ENABLE_WINDOWSYNC_HCA",
    "ENABLE_WINDOWSYNC_JK",
    "ENABLE_WINDOWSYNC_SK",
];

/// A single cmake command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmakeOption {
    /// `-D<name>=<value>`; `name` may carry a `:TYPE` suffix.
    Define { name: String, value: String },
    /// Any other token, passed through verbatim.
    Raw(String),
}

impl CmakeOption {
    #[must_use]
    pub fn define(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Define {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `ON`/`OFF` define.
    #[must_use]
    pub fn switch(name: impl Into<String>, on: bool) -> Self {
        Self::define(name, if on { "ON" } else { "OFF" })
    }

    /// Classifies one token. `-DNAME=VALUE` becomes a define, everything
    /// else stays raw.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        token
            .strip_prefix("-D")
            .and_then(|rest| rest.split_once('='))
            .filter(|(name, _)| !name.is_empty())
            .map_or_else(
                || Self::Raw(token.to_string()),
                |(name, value)| Self::define(name, value),
            )
    }

    /// Variable name without any `:TYPE` suffix; `None` for raw tokens.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Define { name, .. } => Some(name.split(':').next().unwrap_or(name)),
            Self::Raw(_) => None,
        }
    }

    /// The token as passed to cmake.
    #[must_use]
    pub fn to_arg(&self) -> String {
        match self {
            Self::Define { name, value } => format!("-D{name}={value}"),
            Self::Raw(token) => token.clone(),
        }
    }
}

impl fmt::Display for CmakeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

/// Ordered option list for one build tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmakeOptions {
    options: Vec<CmakeOption>,
}

impl CmakeOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Parses a whitespace-separated option string from the configuration.
    ///
    /// A detached `-D NAME=VALUE` pair is joined into one define.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut options = Self::new();
        let mut tokens = text.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "-D"
                && let Some(next) = tokens.next()
            {
                options.push(CmakeOption::parse(&format!("-D{next}")));
            } else {
                options.push(CmakeOption::parse(token));
            }
        }
        options
    }

    /// Appends an option. A define drops any earlier define of the same
    /// variable.
    pub fn push(&mut self, option: CmakeOption) {
        if let Some(key) = option.key() {
            self.options.retain(|existing| existing.key() != Some(key));
        }
        self.options.push(option);
    }

    /// Sets `-D<name>=<value>`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(CmakeOption::define(name, value));
    }

    /// Appends every option of `other`, in order.
    pub fn extend(&mut self, other: Self) {
        for option in other.options {
            self.push(option);
        }
    }

    /// Serializes the options to cmake arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.options.iter().map(CmakeOption::to_arg).collect()
    }
}

impl fmt::Display for CmakeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(" "))
    }
}

impl FromIterator<CmakeOption> for CmakeOptions {
    fn from_iter<I: IntoIterator<Item = CmakeOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.push(option);
        }
        options
    }
}

/// Process synchronization method used by ReproMPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyncType {
    /// `MPI_Barrier` (all window-sync switches off).
    #[value(name = "mpi_barrier")]
    MpiBarrier,
    /// Dissemination barrier.
    #[value(name = "dissemination_barrier")]
    DisseminationBarrier,
    /// HCA window-based synchronization.
    #[value(name = "hca")]
    Hca,
    /// Jones-Koenig window-based synchronization.
    #[value(name = "jk")]
    Jk,
    /// SKaMPI window-based synchronization.
    #[value(name = "skampi")]
    Skampi,
}

impl SyncType {
    /// Index into [`SYNC_FLAGS`] of the switch this method turns on.
    const fn enabled_flag(self) -> Option<usize> {
        match self {
            Self::MpiBarrier => None,
            Self::DisseminationBarrier => Some(0),
            Self::Hca => Some(1),
            Self::Jk => Some(2),
            Self::Skampi => Some(3),
        }
    }

    /// All four synchronization switches for this method.
    #[must_use]
    pub fn options(self) -> CmakeOptions {
        let enabled = self.enabled_flag();
        SYNC_FLAGS
            .iter()
            .enumerate()
            .map(|(index, flag)| CmakeOption::switch(*flag, enabled == Some(index)))
            .collect()
    }
}

/// Target platform, selecting a platform file shipped with ReproMPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompilerType {
    /// Cray XC40.
    Cray,
    /// Blue Gene/Q with the IBM compiler.
    Bgq,
    /// Intel compiler.
    Intel,
    /// Plain `mpicc` from PATH.
    Default,
}

impl CompilerType {
    #[must_use]
    pub const fn platform_file(self) -> &'static str {
        match self {
            Self::Cray => "CrayXC40.cmake",
            Self::Bgq => "BlueGeneQ_IBMcompiler.cmake",
            Self::Intel => "intel_compiler.cmake",
            Self::Default => "default.cmake",
        }
    }

    /// `INCLUDE_PLATFORM_CONFIG_FILE=platform_files/<file>`.
    #[must_use]
    pub fn option(self) -> CmakeOption {
        CmakeOption::define(
            INCLUDE_PLATFORM_CONFIG_FILE,
            format!("platform_files/{}", self.platform_file()),
        )
    }
}

/// Build variant chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildVariant {
    pub sync_type: Option<SyncType>,
    pub compiler_type: Option<CompilerType>,
    pub rdtscp: bool,
    pub cpu_freq_mhz: Option<u32>,
}

impl BuildVariant {
    /// Options contributed to the ReproMPI tree.
    #[must_use]
    pub fn reprompi_options(&self) -> CmakeOptions {
        let mut options = CmakeOptions::new();
        if self.rdtscp {
            options.push(CmakeOption::switch(ENABLE_RDTSCP, true));
        }
        if let Some(freq) = self.cpu_freq_mhz {
            options.set(FREQUENCY_MHZ, freq.to_string());
        }
        if let Some(sync_type) = self.sync_type {
            options.extend(sync_type.options());
        }
        if let Some(compiler_type) = self.compiler_type {
            options.push(compiler_type.option());
        }
        options
    }

    /// Options contributed to the generated tree.
    #[must_use]
    pub fn datatybe_options(&self) -> CmakeOptions {
        self.compiler_type
            .map(CompilerType::option)
            .into_iter()
            .collect()
    }
}

/// Full option list for the ReproMPI tree.
#[must_use]
pub fn reprompi_tree_options(
    default_options: &str,
    options: &str,
    variant: &BuildVariant,
) -> CmakeOptions {
    let mut all = CmakeOptions::parse(default_options);
    all.extend(CmakeOptions::parse(options));
    all.extend(variant.reprompi_options());
    all
}

/// Full option list for the generated tree, pointing it at `source_tree`.
#[must_use]
pub fn datatybe_tree_options(
    source_tree: &Path,
    default_options: &str,
    options: &str,
    variant: &BuildVariant,
) -> CmakeOptions {
    let mut all = CmakeOptions::new();
    all.set(REPRO_MPI_BENCHMARK_DIR, source_tree.display().to_string());
    all.extend(CmakeOptions::parse(default_options));
    all.extend(CmakeOptions::parse(options));
    all.extend(variant.datatybe_options());
    all
}
