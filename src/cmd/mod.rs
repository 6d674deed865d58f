// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! main --> BuildContext (settings, layout, dry-run, cancel token)
//!   clone      acquire                           --> stage: cloned
//!   configure  [clean] [acquire] generate, cmake x2 --> stage: configured
//!   compile    make + install, make               --> stage: compiled
//!   all        configure (clone forced), compile
//!   options, status
//! ```
//!
//! The state marker and the layout directories together gate each step.

pub mod all;
pub mod clone;
pub mod compile;
pub mod configure;
pub mod info;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::layout::BuildLayout;
use crate::state::BuildState;
use crate::tools::ToolContext;

/// Everything a step needs, computed once per invocation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    settings: Arc<Settings>,
    layout: BuildLayout,
    dry_run: bool,
    cancel_token: CancellationToken,
}

impl BuildContext {
    /// Creates the context for `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the layout cannot be derived
    /// from the settings.
    pub fn new(settings: Settings, dry_run: bool, cancel_token: CancellationToken) -> Result<Self> {
        let layout = BuildLayout::from_settings(&settings)?;
        Ok(Self {
            settings: Arc::new(settings),
            layout,
            dry_run,
            cancel_token,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    #[must_use]
    pub const fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    #[must_use]
    pub const fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Context handed to the external tools.
    #[must_use]
    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            Arc::clone(&self.settings),
            self.cancel_token.clone(),
            self.dry_run,
        )
    }

    /// Loads the state marker of the build directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker exists but cannot be read.
    pub fn load_state(&self) -> Result<Option<BuildState>> {
        BuildState::load(&self.layout.state_file())
    }

    /// Persists `state`; a dry run only logs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be written.
    pub fn save_state(&self, state: &BuildState) -> Result<()> {
        if self.dry_run {
            info!(stage = %state.stage, "[dry-run] Would record build state");
            return Ok(());
        }
        state.save(&self.layout.state_file())
    }
}

/// Prints the banner announcing a step.
pub(crate) fn announce(title: &str) {
    println!("{}", crate::logging::step_banner(title));
}
