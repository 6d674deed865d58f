// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command implementation.

use crate::acquire::{Acquisition, acquire};
use crate::cmd::{BuildContext, announce};
use crate::error::Result;
use crate::state::BuildState;

/// Acquires the ReproMPI tree and records the `cloned` stage.
///
/// # Errors
///
/// Returns an error if acquisition fails or the state marker cannot be
/// written.
pub async fn acquire_step(ctx: &BuildContext) -> Result<Acquisition> {
    announce("Copying/Cloning the ReproMPI code");

    let acquisition = acquire(&ctx.tool_context(), ctx.layout()).await?;

    let settings = ctx.settings();
    ctx.save_state(&BuildState::cloned(
        acquisition.method,
        settings.reprompi_locator.as_str(),
        settings.reprompi_revision.as_str(),
        acquisition.head.clone(),
    ))?;
    println!("Done.");
    Ok(acquisition)
}

/// Main handler for the clone command.
///
/// # Errors
///
/// Returns an error if the source tree cannot be acquired.
pub async fn run_clone_command(ctx: &BuildContext) -> Result<()> {
    let acquisition = acquire_step(ctx).await?;
    println!("\n\nReproMPI code was cloned here: {}", acquisition.path.display());
    Ok(())
}
