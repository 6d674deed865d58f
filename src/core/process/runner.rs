// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     command()
//!     args, cwd, piped stdio
//!              |
//!              v
//!          spawn() --> run_child
//!              |
//!              v
//!    interrupted?  --> ProcessError::Interrupted
//!    exit != 0     --> ProcessError::NonZeroExit { output }
//!    ECHO_OUTPUT   --> print output
//!              |
//!              v
//!       ProcessOutput
//! ```

use crate::error::{ProcessError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};

impl ProcessBuilder {
    /// Name used in logs: the explicit name, or the program's file stem.
    fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".into(), |s| s.to_string_lossy().into_owned())
    }

    /// The command line as logged and reported in errors. Arguments
    /// containing spaces are quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().map(|arg| {
                if arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs to completion without external cancellation.
    ///
    /// # Errors
    ///
    /// See [`ProcessBuilder::run_with_cancellation`].
    pub async fn run(self) -> Result<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Runs the process, killing it if `token` fires.
    ///
    /// # Errors
    ///
    /// `SpawnFailed` if the program cannot be started, `Interrupted` on
    /// cancellation, `NonZeroExit` for a failing exit status.
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let line = self.command_line();

        if token.is_cancelled() {
            return Err(ProcessError::Interrupted { command: line }.into());
        }

        if let Some(cwd) = &self.cwd {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %line, "exec");

        let mut child = self
            .command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child, token).await?;

        if output.is_interrupted() {
            return Err(ProcessError::Interrupted { command: line }.into());
        }
        if !output.success() {
            return Err(ProcessError::NonZeroExit {
                command: line,
                code: output.exit_code(),
                output: output.output().to_string(),
            }
            .into());
        }
        if self.flags.contains(ProcessFlags::ECHO_OUTPUT) && !output.output().is_empty() {
            println!("{}", output.output());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}
