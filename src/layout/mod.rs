// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build directory layout.
//!
//! ```text
//! <benchmark_source_dir>             benchmark C sources (generator input)
//! <build_dir>/
//!   ├── <name from locator>/          acquired ReproMPI tree
//!   │     └── <code_generator_script>
//!   ├── <gen_code_dirname>/           generated benchmark tree
//!   └── .datatybe-state.json          stage marker
//! ```
//!
//! The acquired tree's name comes from the locator's base name:
//!
//! ```text
//! https://github.com/hunsa/reprompi.git  --> reprompi
//! git@github.com:hunsa/reprompi.git      --> reprompi
//! /home/me/reprompi/                     --> reprompi
//! ```


use std::path::{Path, PathBuf};

use crate::config::{Settings, keys};
use crate::error::ConfigError;

/// File name of the persisted stage marker inside the build directory.
pub const STATE_FILE_NAME: &str = ".datatybe-state.json";

/// Derives the acquired tree's directory name from a locator.
///
/// Trailing `/` is stripped, the last component after `/` or `:` is taken and
/// one trailing extension (`.git`, `.tar`, ...) is removed. Returns `None` if
/// nothing usable remains.
#[must_use]
pub fn source_dir_name(locator: &str) -> Option<String> {
    let trimmed = locator.trim().trim_end_matches('/');
    let base = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);

    let name = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };

    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Resolved paths of everything the orchestrator reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
    build_dir: PathBuf,
    source_name: String,
    gen_code_dirname: String,
    generator_script: PathBuf,
    source_list: PathBuf,
    benchmark_sources: PathBuf,
}

impl BuildLayout {
    /// Computes the layout for the given settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if no directory name can be derived
    /// from the locator.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let source_name = source_dir_name(&settings.reprompi_locator).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: keys::REPROMPI_LOCATOR.to_string(),
                message: format!(
                    "cannot derive a directory name from '{}'",
                    settings.reprompi_locator
                ),
            }
        })?;

        Ok(Self {
            root: settings.root.clone(),
            build_dir: settings.build_dir.clone(),
            source_name,
            gen_code_dirname: settings.gen_code_dirname.clone(),
            generator_script: settings.code_generator_script.clone(),
            source_list: settings.source_list.clone(),
            benchmark_sources: settings.benchmark_source_dir.clone(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Directory name of the acquired tree.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// `<build_dir>/<name>`: the acquired ReproMPI tree.
    #[must_use]
    pub fn source_tree(&self) -> PathBuf {
        self.build_dir.join(&self.source_name)
    }

    /// `<build_dir>/<gen_code_dirname>`: the generated benchmark tree.
    #[must_use]
    pub fn generated_dir(&self) -> PathBuf {
        self.build_dir.join(&self.gen_code_dirname)
    }

    /// The code generator script inside the acquired tree.
    #[must_use]
    pub fn generator_script(&self) -> PathBuf {
        self.source_tree().join(&self.generator_script)
    }

    /// Benchmark sources handed to the code generator (`bench/` by default).
    #[must_use]
    pub fn benchmark_source_dir(&self) -> &Path {
        &self.benchmark_sources
    }

    #[must_use]
    pub fn source_list(&self) -> &Path {
        &self.source_list
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.build_dir.join(STATE_FILE_NAME)
    }
}
