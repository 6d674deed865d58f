// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              DatatybeError (16 bytes)
//!                     |
//!   +-------+--------+---+-----+------+-----+
//!   |       |        |         |      |     |
//!   v       v        v         v      v     v
//! Config Acquire  Precond   Process  Fs    Git
//!  Box     Box      Box       Box    Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Config       NotFound, MalformedLine, MissingKey, InvalidValue
//!   Acquire      Failed, GeneratorMissing
//!   Precondition NotCloned, NotConfigured
//!   Process      ExecutableNotFound, SpawnFailed, NonZeroExit, Interrupted
//!   Fs           NotFound, IoError
//!   Git          Open, Head
//!
//! All variants boxed => DatatybeError fits in 16 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DatatybeError`].
pub type DatatybeResult<T> = std::result::Result<T, DatatybeError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum DatatybeError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Source acquisition error.
    #[error("acquire error: {0}")]
    Acquire(#[from] Box<AcquireError>),

    /// A step was invoked before its prerequisite step completed.
    #[error("precondition failed: {0}")]
    Precondition(#[from] Box<PreconditionError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Git query error.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DatatybeError {
                fn from(err: $error) -> Self {
                    DatatybeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    AcquireError => Acquire,
    PreconditionError => Precondition,
    ProcessError => Process,
    FsError => Fs,
    GitError => Git,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("invalid path: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank, non-comment line without a `key = value` separator.
    #[error("incorrect line {line_number} in configuration file '{path}': {line}")]
    MalformedLine {
        path: String,
        line_number: usize,
        line: String,
    },

    /// Failed to parse or merge configuration sources.
    #[error("failed to parse configuration: {message}")]
    ParseError { message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Acquire Errors ---

/// Source acquisition errors.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Neither clone nor local copy produced a source tree.
    #[error("failed to obtain ReproMPI code from: {locator}")]
    Failed { locator: String },

    /// The generator script is missing from the acquired tree.
    #[error(
        "git clone failed or wrong revision downloaded - cannot find the code generation script in: {path}"
    )]
    GeneratorMissing { path: String },
}

// --- Precondition Errors ---

/// Ordering violations between orchestration steps.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// `configure` ran without an acquired source tree.
    #[error("the ReproMPI code cannot be found at: {path}\nPlease clone the code with \"datatybe clone\"")]
    NotCloned { path: String },

    /// `compile` ran before `configure`.
    #[error("{what} does not exist in {path}\nPlease run \"datatybe configure\" first")]
    NotConfigured { what: String, path: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-successful status.
    #[error("'{command}' exited with code {code}\n{output}")]
    NonZeroExit {
        command: String,
        code: i32,
        output: String,
    },

    /// Process was interrupted by the user.
    #[error("'{command}' was interrupted")]
    Interrupted { command: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Git Errors ---

/// Read-only git query errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Failed to open repository.
    #[error("failed to open repository {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: Box<gix::open::Error>,
    },

    /// Failed to resolve HEAD.
    #[error("failed to resolve HEAD in {path}: {source}")]
    Head {
        path: String,
        #[source]
        source: gix::reference::find::existing::Error,
    },
}
