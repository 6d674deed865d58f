// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/which/configured_or_which/find/raw
//!  • arg/args/cwd/name
//!  • echo_output (output is always captured)
//!
//! ProcessFlags: ECHO_OUTPUT
//! ```

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::ProcessError;

/// `which` results, keyed by program name, shared by every lookup.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

bitflags! {
    /// Flags controlling process execution behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Print the captured output to stdout once the process succeeds.
        const ECHO_OUTPUT = 0x01;
    }
}

/// Output from a completed process.
///
/// `output` holds stdout and stderr merged in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    output: String,
    interrupted: bool,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, output: String, interrupted: bool) -> Self {
        Self {
            exit_code,
            output,
            interrupted,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Combined stdout/stderr text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Whether the run was cut short by the cancellation token.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One external command: program, arguments, working directory and flags.
///
/// Output is always captured; stderr is merged into stdout.
#[derive(Debug)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) cwd: Option<PathBuf>,
    pub(super) flags: ProcessFlags,
    /// Display name for logs and errors; defaults to the program's stem.
    pub(super) name: Option<String>,
}

impl ProcessBuilder {
    /// Runs `program` as given. A bare name is resolved by the OS at spawn
    /// time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            flags: ProcessFlags::empty(),
            name: None,
        }
    }

    /// Resolves `program` via PATH first.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it is not in PATH.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    /// Uses the configured executable (`git_executable`, ...) when set,
    /// otherwise looks `program` up in PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the configured path does
    /// not exist or `program` is not in PATH.
    pub fn configured_or_which(
        configured: Option<&Path>,
        program: &str,
    ) -> Result<Self, ProcessError> {
        match configured {
            Some(path) if path.components().count() == 1 => {
                Self::which(&path.to_string_lossy())
            }
            Some(path) if path.exists() => Ok(Self::new(path)),
            Some(path) => Err(ProcessError::ExecutableNotFound {
                name: path.display().to_string(),
            }),
            None => Self::which(program),
        }
    }

    /// Full path of `program` in PATH, cached after the first lookup.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        if let Some(path) = exe_cache()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
        {
            return Some(path.clone());
        }

        let path = which::which(program).ok()?;
        exe_cache()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    /// Runs `command` through `/bin/sh -c`.
    #[cfg(test)]
    pub(crate) fn raw(command: impl Into<String>) -> Self {
        Self::new("/bin/sh").arg("-c").arg(command.into())
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Echo the captured output to stdout on success.
    #[must_use]
    pub fn echo_output(mut self, echo: bool) -> Self {
        self.flags.set(ProcessFlags::ECHO_OUTPUT, echo);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
