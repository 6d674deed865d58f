// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wrappers around the external tools the build drives.
//!
//! ```text
//! cmd step --> ToolContext --> Tool --> ProcessBuilder
//!   git        clone --no-checkout, checkout <rev>
//!   generator  <script> -d <src> -o <gen> -l <list>
//!   cmake      clear cache, cmake <options> <source>
//!   make       make -j N [install]
//! ToolContext: settings, cancel token, dry-run flag
//! ```
//!
//! All tools support graceful cancellation via `CancellationToken`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::error::Result;

pub mod cmake;
pub mod generator;
pub mod git;
pub mod make;

use futures_util::future::BoxFuture;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancellation token for cooperative cancellation.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without making changes.
    dry_run: bool,

    settings: Arc<Settings>,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub const fn new(
        settings: Arc<Settings>,
        cancel_token: CancellationToken,
        dry_run: bool,
    ) -> Self {
        Self {
            cancel_token,
            dry_run,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Trait for tools that execute external processes.
///
/// Each tool encapsulates one external operation (git clone, cmake
/// configure, make install, ...).
///
/// # Implementation Notes
///
/// - Tools use `ProcessBuilder::run_with_cancellation()` for process execution
/// - Tools respect `ctx.is_dry_run()` and only log actions without executing
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "git", "cmake", "make").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    ///
    /// # Errors
    ///
    /// Fails if the operation failed or was cancelled.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
