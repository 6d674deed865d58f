// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Settings --> BuildContext --> Command Dispatch
//!   Clone | Configure | Compile | All | Options | Status
//! ```

use std::process::ExitCode;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use datatybe_build::cli::build::CloneArgs;
use datatybe_build::cli::global::GlobalOptions;
use datatybe_build::cli::{self, Command};
use datatybe_build::cmd::BuildContext;
use datatybe_build::cmd::all::run_all_command;
use datatybe_build::cmd::clone::run_clone_command;
use datatybe_build::cmd::compile::run_compile_command;
use datatybe_build::cmd::configure::run_configure_command;
use datatybe_build::cmd::info::{run_options_command, run_status_command};
use datatybe_build::config::{ENV_PREFIX, Settings};
use datatybe_build::error::Result;
use datatybe_build::logging::init_logging;
use datatybe_build::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Options) => {
            load_settings(&cli.global, None).map(|settings| run_options_command(&settings))
        }
        Some(Command::Status) => {
            build_context(&cli.global, None).and_then(|ctx| run_status_command(&ctx))
        }
        Some(Command::Clone(args)) => match build_context(&cli.global, Some(args)) {
            Ok(ctx) => run_clone_command(&ctx).await,
            Err(e) => Err(e),
        },
        Some(Command::Configure(args)) => match build_context(&cli.global, Some(&args.source)) {
            Ok(ctx) => run_configure_command(&args.variant, &ctx).await,
            Err(e) => Err(e),
        },
        Some(Command::Compile) => match build_context(&cli.global, None) {
            Ok(ctx) => run_compile_command(&ctx).await,
            Err(e) => Err(e),
        },
        Some(Command::All(args)) => match build_context(&cli.global, Some(&args.source)) {
            Ok(ctx) => run_all_command(&args.variant, &ctx).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Layers the configuration file, `DATATYBE_*` variables, `--set` and the
/// `--git`/`--sha1` flags, in increasing precedence.
fn load_settings(global: &GlobalOptions, source: Option<&CloneArgs>) -> Result<Settings> {
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let mut loader = Settings::builder(global.project_root(&cwd))
        .add_file(global.config_file(&cwd))
        .with_env_prefix(ENV_PREFIX)
        .set_all(&global.options)?;
    for (key, value) in source.map(CloneArgs::to_config_overrides).unwrap_or_default() {
        loader = loader.set(key, value)?;
    }
    loader.build()
}

fn build_context(global: &GlobalOptions, source: Option<&CloneArgs>) -> Result<BuildContext> {
    let settings = load_settings(global, source)?;

    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting...");
            token.cancel();
        }
    });

    BuildContext::new(settings, global.dry, cancel_token)
}
