// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain `key = value` configuration files.
//!
//! ```text
//! # comment            skipped
//!                      skipped (blank)
//! build_dir = build    ("build_dir", "build")
//! opts = -DA=1 -DB=2   ("opts", "-DA=1 -DB=2")   split on first '=' only
//! garbage              MalformedLine (whole load fails)
//! ```
//!
//! The same parser backs [`KeyValueFormat`], which plugs the file syntax into
//! the `config` crate so it can be layered with environment and CLI sources.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Ordered key/value mapping as read from a configuration file.
pub type ConfigMap = BTreeMap<String, String>;

const COMMENT_PREFIX: char = '#';
const SEPARATOR: char = '=';

/// Parses `key = value` text.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns `ConfigError::MalformedLine` for the first non-blank, non-comment
/// line that has no `=`. No partial mapping is returned.
pub fn parse_key_values(text: &str, origin: &str) -> Result<ConfigMap, ConfigError> {
    let mut map = ConfigMap::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let Some((key, value)) = trimmed.split_once(SEPARATOR) else {
            return Err(ConfigError::MalformedLine {
                path: origin.to_string(),
                line_number: index + 1,
                line: trimmed.to_string(),
            });
        };

        map.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(map)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the path does not exist,
/// `ConfigError::ReadError` if it cannot be read, and
/// `ConfigError::MalformedLine` for a line without a separator.
pub fn load_key_value_file(path: &Path) -> Result<ConfigMap, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;

    parse_key_values(&text, &path.display().to_string())
}

/// `config` crate format for `key = value` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueFormat;

impl config::Format for KeyValueFormat {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> Result<config::Map<String, config::Value>, Box<dyn std::error::Error + Send + Sync>> {
        let origin = uri.map_or("<string>", String::as_str);
        let map = parse_key_values(text, origin)?;

        Ok(map
            .into_iter()
            .map(|(key, value)| (key, config::Value::new(uri, value)))
            .collect())
    }
}

impl config::FileStoredFormat for KeyValueFormat {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["conf"]
    }
}
