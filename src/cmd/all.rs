// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! All command implementation: clone, configure and compile in sequence.

use crate::cli::build::VariantArgs;
use crate::cmd::BuildContext;
use crate::cmd::compile::run_compile_command;
use crate::cmd::configure::configure;
use crate::error::Result;

/// Main handler for the all command.
///
/// The source tree is always acquired, once, as part of configure.
///
/// # Errors
///
/// Returns the error of the first step that fails.
pub async fn run_all_command(args: &VariantArgs, ctx: &BuildContext) -> Result<()> {
    configure(ctx, &args.variant(), args.clean, true).await?;
    run_compile_command(ctx).await
}
