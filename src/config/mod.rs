// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for datatybe-build.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. config/build.conf (or --config)
//! 2. DATATYBE_* env vars
//! 3. CLI overrides (--git, --sha1, --set)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DATATYBE_BUILD_DIR=/scratch/b         → build_dir = "/scratch/b"
//! DATATYBE_SHA1_REPROMPI_BENCH=abc123   → sha1_reprompi_bench = "abc123"
//! ```

pub mod keyvalue;
pub mod loader;


use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use keyvalue::ConfigMap;
use loader::ConfigLoader;

/// Configuration keys understood by the orchestrator.
pub mod keys {
    pub const BUILD_DIR: &str = "build_dir";
    pub const REPROMPI_LOCATOR: &str = "git_reprompi_bench";
    pub const REPROMPI_REVISION: &str = "sha1_reprompi_bench";
    pub const CODE_GENERATOR_SCRIPT: &str = "code_generator_script";
    pub const GEN_CODE_DIRNAME: &str = "gen_code_dirname";
    pub const SOURCE_LIST: &str = "path_to_list_of_source_files";
    pub const REPROMPI_DEFAULT_OPTIONS: &str = "reprompi_default_cmake_options";
    pub const REPROMPI_OPTIONS: &str = "reprompi_cmake_options";
    pub const DATATYBE_DEFAULT_OPTIONS: &str = "mpidatatybe_default_cmake_options";
    pub const DATATYBE_OPTIONS: &str = "mpidatatybe_cmake_options";
    pub const GIT_EXECUTABLE: &str = "git_executable";
    pub const CMAKE_EXECUTABLE: &str = "cmake_executable";
    pub const MAKE_EXECUTABLE: &str = "make_executable";
    pub const BUILD_JOBS: &str = "build_jobs";
    pub const BENCHMARK_SOURCE_DIR: &str = "benchmark_source_dir";
}

/// Environment prefix for overrides.
pub const ENV_PREFIX: &str = "DATATYBE";

/// Default configuration file, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "config/build.conf";

/// Generator input directory unless `benchmark_source_dir` is set.
pub const DEFAULT_BENCHMARK_SOURCE_DIR: &str = "bench";

/// Parallel jobs passed to make unless `build_jobs` is set.
pub const DEFAULT_BUILD_JOBS: u32 = 4;

/// Executable overrides for the external tools.
///
/// `None` means the tool is looked up in PATH.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsConfig {
    pub git: Option<PathBuf>,
    pub cmake: Option<PathBuf>,
    pub make: Option<PathBuf>,
}

/// Typed settings resolved from the merged configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project root; relative paths resolve against it.
    pub root: PathBuf,
    /// Root of both build trees.
    pub build_dir: PathBuf,
    /// URL or local path of the ReproMPI repository.
    pub reprompi_locator: String,
    /// Revision checked out after cloning.
    pub reprompi_revision: String,
    /// Generator script, relative to the acquired tree.
    pub code_generator_script: PathBuf,
    /// Directory name of the generated code inside `build_dir`.
    pub gen_code_dirname: String,
    /// List-of-source-files artifact handed to the generator.
    pub source_list: PathBuf,
    /// Benchmark C sources the generator reads (`-d`).
    pub benchmark_source_dir: PathBuf,
    pub reprompi_default_cmake_options: String,
    pub reprompi_cmake_options: String,
    pub datatybe_default_cmake_options: String,
    pub datatybe_cmake_options: String,
    pub tools: ToolsConfig,
    /// Parallel jobs for make.
    pub build_jobs: u32,
    raw: ConfigMap,
}

impl Settings {
    /// Create a new configuration loader rooted at `root`.
    #[must_use]
    pub fn builder(root: impl Into<PathBuf>) -> ConfigLoader {
        ConfigLoader::new(root)
    }

    /// Load settings from a single configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or if a required
    /// key is missing.
    pub fn from_file(path: impl AsRef<Path>, root: impl Into<PathBuf>) -> crate::error::Result<Self> {
        Self::builder(root).add_file(path).build()
    }

    /// Builds typed settings from a raw mapping.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` for an absent required key and
    /// `ConfigError::InvalidValue` for an unusable value.
    pub fn from_map(raw: ConfigMap, root: &Path) -> Result<Self, ConfigError> {
        let required = |key: &str| -> Result<String, ConfigError> {
            raw.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| ConfigError::MissingKey {
                    key: key.to_string(),
                })
        };
        let optional = |key: &str| raw.get(key).cloned().unwrap_or_default();
        let tool = |key: &str| {
            raw.get(key)
                .filter(|v| !v.is_empty())
                .map(|v| resolve_executable(root, Path::new(v)))
        };

        let gen_code_dirname = required(keys::GEN_CODE_DIRNAME)?;
        if Path::new(&gen_code_dirname).components().count() != 1 {
            return Err(ConfigError::InvalidValue {
                key: keys::GEN_CODE_DIRNAME.to_string(),
                message: format!("expected a single directory name, got '{gen_code_dirname}'"),
            });
        }

        let benchmark_source_dir = raw
            .get(keys::BENCHMARK_SOURCE_DIR)
            .filter(|v| !v.is_empty())
            .map_or(DEFAULT_BENCHMARK_SOURCE_DIR, String::as_str);

        let build_jobs = match raw.get(keys::BUILD_JOBS).filter(|v| !v.is_empty()) {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|jobs| *jobs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: keys::BUILD_JOBS.to_string(),
                    message: format!("expected a positive integer, got '{value}'"),
                })?,
            None => DEFAULT_BUILD_JOBS,
        };

        Ok(Self {
            root: root.to_path_buf(),
            build_dir: resolve(root, Path::new(&required(keys::BUILD_DIR)?)),
            reprompi_locator: required(keys::REPROMPI_LOCATOR)?,
            reprompi_revision: required(keys::REPROMPI_REVISION)?,
            code_generator_script: PathBuf::from(required(keys::CODE_GENERATOR_SCRIPT)?),
            gen_code_dirname,
            source_list: resolve(root, Path::new(&required(keys::SOURCE_LIST)?)),
            benchmark_source_dir: resolve(root, Path::new(benchmark_source_dir)),
            reprompi_default_cmake_options: optional(keys::REPROMPI_DEFAULT_OPTIONS),
            reprompi_cmake_options: optional(keys::REPROMPI_OPTIONS),
            datatybe_default_cmake_options: optional(keys::DATATYBE_DEFAULT_OPTIONS),
            datatybe_cmake_options: optional(keys::DATATYBE_OPTIONS),
            tools: ToolsConfig {
                git: tool(keys::GIT_EXECUTABLE),
                cmake: tool(keys::CMAKE_EXECUTABLE),
                make: tool(keys::MAKE_EXECUTABLE),
            },
            build_jobs,
            raw,
        })
    }

    /// The merged key/value mapping these settings were built from.
    #[must_use]
    pub const fn raw(&self) -> &ConfigMap {
        &self.raw
    }

    /// Format configuration options for display, aligned on `=`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let max_key_len = self.raw.keys().map(String::len).max().unwrap_or(0);

        self.raw
            .iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Bare program names stay as-is for PATH lookup; other paths resolve
/// against `root`.
fn resolve_executable(root: &Path, path: &Path) -> PathBuf {
    if path.components().count() == 1 {
        path.to_path_buf()
    } else {
        resolve(root, path)
    }
}

/// Joins relative paths onto `root`; absolute paths pass through.
#[must_use]
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
