// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new(root)
//!   .add_file(build.conf)      key = value (required)
//!   .add_str()                 key = value (tests)
//!   .with_env_prefix()         DATATYBE_BUILD_DIR=...
//!   .set()                     --git / --sha1 / --set
//!        |
//!        v
//!    build_map()               flat keys, later layers win
//!        |
//!        v
//!    build() --> Settings
//! ```

use std::path::{Path, PathBuf};

use config::{File, Source};

use super::Settings;
use super::keyvalue::{ConfigMap, KeyValueFormat, load_key_value_file};
use crate::error::{ConfigError, Result};

type BoxedSource = Box<dyn Source + Send + Sync>;

/// Builder for loading configuration from multiple sources.
///
/// Keys are kept flat: `platform.note` is one key, never a nested table.
/// Later layers replace earlier ones key by key.
pub struct ConfigLoader {
    sources: Vec<BoxedSource>,
    root: PathBuf,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    /// Creates a loader whose relative paths resolve against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            sources: Vec::new(),
            root: root.into(),
            env_prefix: None,
            files: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Adds a `key = value` configuration file.
    ///
    /// The file is validated and read when `build()` is called.
    #[must_use]
    pub fn add_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.sources.push(Box::new(
            File::new(&p.to_string_lossy(), KeyValueFormat).required(true),
        ));
        self.files.push(p.to_path_buf());
        self
    }

    /// Adds `key = value` content from a string.
    #[must_use]
    pub fn add_str(mut self, content: &str) -> Self {
        self.sources
            .push(Box::new(File::from_str(content, KeyValueFormat)));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn set(mut self, key: &str, value: impl Into<String>) -> Result<Self> {
        if key.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "override key must not be empty".to_string(),
            }
            .into());
        }
        self.overrides.push((key.to_string(), value.into()));
        Ok(self)
    }

    /// Applies `KEY=VALUE` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override has no `=` or an invalid key.
    pub fn set_all<I, S>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in overrides {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: raw.to_string(),
                    message: "expected KEY=VALUE".to_string(),
                })?;
            self = self.set(key.trim(), value.trim())?;
        }
        Ok(self)
    }

    /// Merges all sources into the raw ordered mapping.
    ///
    /// Files and strings come first in the order they were added, then
    /// environment variables, then overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or malformed, or if an
    /// environment variable is not valid UTF-8.
    pub fn build_map(self) -> Result<ConfigMap> {
        // Run the strict parser first so a bad file surfaces as a typed
        // error rather than an opaque source failure.
        for file in &self.files {
            load_key_value_file(file)?;
        }

        let mut map = ConfigMap::new();
        let env = self
            .env_prefix
            .as_deref()
            .map(|prefix| Box::new(config::Environment::with_prefix(prefix)) as BoxedSource);

        for source in self.sources.iter().chain(env.iter()) {
            let layer = source.collect().map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;
            for (key, value) in layer {
                let value = value.into_string().map_err(|e| ConfigError::InvalidValue {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
                map.insert(key, value);
            }
        }

        map.extend(self.overrides);
        Ok(map)
    }

    /// Builds typed settings from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A configuration file is missing or has a malformed line.
    /// - A required key is missing or a value is invalid.
    pub fn build(self) -> Result<Settings> {
        let root = self.root.clone();
        let map = self.build_map()?;
        Ok(Settings::from_map(map, &root)?)
    }
}
