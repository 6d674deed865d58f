// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compile command implementation.

use std::path::Path;

use tracing::warn;

use crate::cmd::{BuildContext, announce};
use crate::error::{PreconditionError, Result};
use crate::layout::BuildLayout;
use crate::state::Stage;
use crate::tools::Tool;
use crate::tools::make::MakeTool;

/// Directory of the ReproMPI tree holding its shared libraries.
const REPROMPI_LIB_DIR: &str = "lib";

fn missing(what: &str, path: &Path) -> PreconditionError {
    PreconditionError::NotConfigured {
        what: what.to_string(),
        path: path.display().to_string(),
    }
}

fn check_configured(ctx: &BuildContext) -> Result<()> {
    let layout = ctx.layout();
    if !layout.build_dir().is_dir() {
        return Err(missing("Build directory", layout.build_dir()).into());
    }
    let tree = layout.source_tree();
    if !tree.is_dir() {
        return Err(missing("The ReproMPI code", &tree).into());
    }
    let generated = layout.generated_dir();
    if !generated.is_dir() {
        return Err(missing("The mpi-datatybe generated code", &generated).into());
    }
    let configured = ctx
        .load_state()?
        .is_some_and(|state| state.reached(Stage::Configured));
    if !configured {
        return Err(missing("A configured build state", &layout.state_file()).into());
    }
    Ok(())
}

/// Fails unless `configure` completed for the current layout.
///
/// A dry run only warns.
///
/// # Errors
///
/// Returns `PreconditionError::NotConfigured` naming the first missing
/// piece.
pub fn require_configured(ctx: &BuildContext) -> Result<()> {
    match check_configured(ctx) {
        Err(e) if ctx.is_dry_run() => {
            warn!("{e:#}");
            Ok(())
        }
        result => result,
    }
}

/// Instructions for running the generated benchmark.
#[must_use]
pub fn run_instructions(layout: &BuildLayout) -> Vec<String> {
    vec![
        "How to run mpi-datatybe:".to_string(),
        format!(
            "  export LD_LIBRARY_PATH={}:$LD_LIBRARY_PATH",
            layout.source_tree().join(REPROMPI_LIB_DIR).display()
        ),
        format!("  cd {}", layout.generated_dir().display()),
        "  mpirun -np 4 ./bin/reprompibench --params=b:MPI_INT --params=root:0 \\".to_string(),
        "      --params=test_type:datatype --params=pattern:bcast --params=layout:tiled \\"
            .to_string(),
        "      --params=A:1 --params=B:16 --params=nbytes_list:256 --nrep=10".to_string(),
    ]
}

/// Main handler for the compile command.
///
/// # Errors
///
/// Returns an error if `configure` has not completed or make fails.
pub async fn run_compile_command(ctx: &BuildContext) -> Result<()> {
    require_configured(ctx)?;

    let layout = ctx.layout();
    let tools = ctx.tool_context();
    let source_tree = layout.source_tree();
    let generated = layout.generated_dir();

    announce("Compiling ReproMPI");
    MakeTool::new().dir(&source_tree).build_op().run(&tools).await?;
    MakeTool::new().dir(&source_tree).install_op().run(&tools).await?;
    println!("Done.\n");

    announce("Compiling mpi-datatybe");
    MakeTool::new().dir(&generated).build_op().run(&tools).await?;
    println!("Done.\n");

    if let Some(mut state) = ctx.load_state()? {
        state.advance(Stage::Compiled);
        ctx.save_state(&state)?;
    }

    println!("\n\nThe compiled benchmarks can be found here:");
    println!("  - ReproMPI: {}", source_tree.display());
    println!(
        "  - mpi-datatybe (including the generated benchmarking code): {}",
        generated.display()
    );
    println!("\n");
    for line in run_instructions(layout) {
        println!("{line}");
    }
    Ok(())
}
