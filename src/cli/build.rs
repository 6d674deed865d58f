// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! --git / --sha1     override git_reprompi_bench / sha1_reprompi_bench
//! --clean            rm -r <build_dir>, implies --clone
//! --clone            re-acquire ReproMPI before generating
//! --rdtscp, --cpufreq, --synctype      ReproMPI tree
//! --compilertype                       both trees
//! ```

use clap::Args;

use crate::config::keys;
use crate::options::{BuildVariant, CompilerType, SyncType};

/// Source selection, shared by `clone`, `configure` and `all`.
#[derive(Debug, Clone, Default, Args)]
pub struct CloneArgs {
    /// URL or path to the ReproMPI git repository.
    #[arg(long = "git", value_name = "URL")]
    pub git: Option<String>,

    /// Commit SHA1 to check out.
    #[arg(long = "sha1", value_name = "SHA1")]
    pub sha1: Option<String>,
}

impl CloneArgs {
    /// Converts the flags to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(ref git) = self.git {
            overrides.push((keys::REPROMPI_LOCATOR, git.clone()));
        }
        if let Some(ref sha1) = self.sha1 {
            overrides.push((keys::REPROMPI_REVISION, sha1.clone()));
        }
        overrides
    }
}

/// Build variant and cleanup flags of `configure`.
#[derive(Debug, Clone, Default, Args)]
pub struct VariantArgs {
    /// Select synchronization method [default: MPI_Barrier].
    #[arg(long = "synctype", value_enum, value_name = "TYPE")]
    pub synctype: Option<SyncType>,

    /// Select compiler [default: mpicc needs to be available in the path].
    #[arg(long = "compilertype", value_enum, value_name = "TYPE")]
    pub compilertype: Option<CompilerType>,

    /// Enable RDTSCP-based timing.
    #[arg(long, help_heading = "Timing options")]
    pub rdtscp: bool,

    /// Set maximum CPU frequency in MHz.
    #[arg(long, value_name = "MHZ", help_heading = "Timing options")]
    pub cpufreq: Option<u32>,

    /// Remove existing build.
    #[arg(long)]
    pub clean: bool,

    /// Clone the ReproMPI repository.
    #[arg(long)]
    pub clone: bool,
}

impl VariantArgs {
    #[must_use]
    pub const fn variant(&self) -> BuildVariant {
        BuildVariant {
            sync_type: self.synctype,
            compiler_type: self.compilertype,
            rdtscp: self.rdtscp,
            cpu_freq_mhz: self.cpufreq,
        }
    }

    /// Whether configure re-acquires the source tree.
    #[must_use]
    pub const fn reacquire(&self) -> bool {
        self.clean || self.clone
    }
}

/// Arguments for the `configure` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub source: CloneArgs,

    #[command(flatten)]
    pub variant: VariantArgs,
}

/// Arguments for the `all` command: the union of `clone` and `configure`.
pub type AllArgs = ConfigureArgs;
