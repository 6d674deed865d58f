// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configure command implementation.
//!
//! ```text
//! --clean?  rm -r <build_dir>
//! --clean/--clone?  acquire         else require stage >= cloned
//! generator  <script> -d <bench> -o <build>/<gen> -l <list>
//! cmake      <build>/<repo>   default + configured + CLI options
//! cmake      <build>/<gen>    -DREPRO_MPI_BENCHMARK_DIR=<repo> + ...
//! ```

use tracing::{info, warn};

use crate::cli::build::VariantArgs;
use crate::cmd::clone::acquire_step;
use crate::cmd::{BuildContext, announce};
use crate::error::{PreconditionError, Result};
use crate::options::{BuildVariant, datatybe_tree_options, reprompi_tree_options};
use crate::state::Stage;
use crate::tools::Tool;
use crate::tools::cmake::CmakeTool;
use crate::tools::generator::GeneratorTool;
use crate::utility::fs::remove::remove_dir_if_exists;

/// Fails unless a tree has been acquired by a previous `clone`.
///
/// A dry run only warns.
///
/// # Errors
///
/// Returns `PreconditionError::NotCloned` if the tree or the `cloned` stage
/// is missing.
pub fn require_cloned(ctx: &BuildContext) -> Result<()> {
    let tree = ctx.layout().source_tree();
    let cloned = tree.is_dir()
        && ctx
            .load_state()?
            .is_some_and(|state| state.reached(Stage::Cloned));
    if cloned {
        return Ok(());
    }

    let err = PreconditionError::NotCloned {
        path: tree.display().to_string(),
    };
    if ctx.is_dry_run() {
        warn!("{err}");
        return Ok(());
    }
    Err(err.into())
}

async fn clean_build_dir(ctx: &BuildContext) -> Result<()> {
    let build_dir = ctx.layout().build_dir();
    if !build_dir.exists() {
        return Ok(());
    }
    if ctx.is_dry_run() {
        info!(path = %build_dir.display(), "[dry-run] Would remove build directory");
        return Ok(());
    }
    println!("Removing existing build code directory: {}", build_dir.display());
    remove_dir_if_exists(build_dir).await?;
    Ok(())
}

/// Generates the benchmark code and configures both trees.
///
/// # Errors
///
/// Returns an error if a precondition is not met or any external step
/// fails.
pub async fn configure(
    ctx: &BuildContext,
    variant: &BuildVariant,
    clean: bool,
    reacquire: bool,
) -> Result<()> {
    if clean {
        clean_build_dir(ctx).await?;
    }

    if reacquire {
        acquire_step(ctx).await?;
    } else {
        println!("Skipped ReproMPI repository cloning.");
        require_cloned(ctx)?;
    }

    let layout = ctx.layout();
    let settings = ctx.settings();
    let tools = ctx.tool_context();
    let source_tree = layout.source_tree();
    let generated = layout.generated_dir();

    announce("Generating benchmarking code for mpi-datatybe");
    GeneratorTool::new()
        .script(layout.generator_script())
        .source_dir(layout.benchmark_source_dir())
        .output_dir(&generated)
        .source_list(layout.source_list())
        .cwd(layout.root())
        .run(&tools)
        .await?;
    println!("Done.");

    announce("Configuring ReproMPI");
    CmakeTool::new()
        .source_dir(&source_tree)
        .options(reprompi_tree_options(
            &settings.reprompi_default_cmake_options,
            &settings.reprompi_cmake_options,
            variant,
        ))
        .run(&tools)
        .await?;
    println!("Done.");

    announce("Configuring MPI-datatybe");
    CmakeTool::new()
        .source_dir(&generated)
        .options(datatybe_tree_options(
            &source_tree,
            &settings.datatybe_default_cmake_options,
            &settings.datatybe_cmake_options,
            variant,
        ))
        .run(&tools)
        .await?;
    println!("Done.");

    if let Some(mut state) = ctx.load_state()? {
        state.advance(Stage::Configured);
        ctx.save_state(&state)?;
    }

    println!("\n\nThe configured benchmarks can be found here:");
    println!("  - ReproMPI: {}", source_tree.display());
    println!(
        "  - mpi-datatybe (including the generated benchmarking code): {}\n",
        generated.display()
    );
    Ok(())
}

/// Main handler for the configure command.
///
/// # Errors
///
/// Returns an error if a precondition is not met or any external step
/// fails.
pub async fn run_configure_command(args: &VariantArgs, ctx: &BuildContext) -> Result<()> {
    configure(ctx, &args.variant(), args.clean, args.reacquire()).await
}
