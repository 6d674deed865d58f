// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted build stage marker.
//!
//! ```text
//! <build_dir>/.datatybe-state.json
//! {
//!   "stage": "configured",         cloned < configured < compiled
//!   "method": "git",               git | copy
//!   "locator": "https://...",
//!   "revision": "deadbeef",
//!   "head": "deadbeef..."          resolved commit, if known
//! }
//! ```
//!
//! A step may only run once the previous stage has been recorded. The
//! marker lives inside the build directory, so `configure --clean` resets it
//! together with everything else.


use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{FsError, Result};

/// Last completed orchestration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Cloned,
    Configured,
    Compiled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloned => write!(f, "cloned"),
            Self::Configured => write!(f, "configured"),
            Self::Compiled => write!(f, "compiled"),
        }
    }
}

/// How the source tree was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquireMethod {
    /// `git clone` + `git checkout <revision>`.
    Git,
    /// Recursive copy of a local directory; the revision was not applied.
    Copy,
}

impl fmt::Display for AcquireMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

/// Contents of the stage marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub stage: Stage,
    pub method: AcquireMethod,
    pub locator: String,
    pub revision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

impl BuildState {
    /// State right after a successful acquisition.
    #[must_use]
    pub fn cloned(
        method: AcquireMethod,
        locator: impl Into<String>,
        revision: impl Into<String>,
        head: Option<String>,
    ) -> Self {
        Self {
            stage: Stage::Cloned,
            method,
            locator: locator.into(),
            revision: revision.into(),
            head,
        }
    }

    /// Returns whether `stage` has been completed.
    #[must_use]
    pub fn reached(&self, stage: Stage) -> bool {
        self.stage >= stage
    }

    /// Records `stage` as completed.
    ///
    /// Moving backwards is allowed: re-running configure after compile
    /// invalidates the previous compile.
    pub const fn advance(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Loads the marker. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid marker.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(FsError::IoError {
                    path: path.display().to_string(),
                    source,
                }
                .into());
            }
        };

        let state = serde_json::from_str(&content)
            .with_context(|| format!("corrupt build state marker {}", path.display()))?;
        Ok(Some(state))
    }

    /// Writes the marker, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize build state")?;
        std::fs::write(path, json + "\n").map_err(|source| FsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}
