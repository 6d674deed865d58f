// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("cmake")
//!   .args() .cwd() .echo_output()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command
//!           stdout + stderr merged line by line
//!       --> ProcessOutput { exit_code, output }
//! ```

pub mod builder;
mod io;
mod runner;
