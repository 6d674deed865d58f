// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only commands: `options` and `status`.

use std::path::Path;

use crate::cmd::BuildContext;
use crate::config::Settings;
use crate::error::Result;
use crate::state::BuildState;

/// Display the effective configuration.
pub fn run_options_command(settings: &Settings) {
    for line in settings.format_options() {
        println!("{line}");
    }
}

fn dir_line(label: &str, path: &Path) -> String {
    let presence = if path.is_dir() { "present" } else { "missing" };
    format!("{label:<10} {} ({presence})", path.display())
}

/// Lines describing the recorded state and the layout directories.
#[must_use]
pub fn status_lines(ctx: &BuildContext, state: Option<&BuildState>) -> Vec<String> {
    let layout = ctx.layout();
    let mut lines = vec![
        dir_line("build", layout.build_dir()),
        dir_line("reprompi", &layout.source_tree()),
        dir_line("generated", &layout.generated_dir()),
    ];

    match state {
        Some(state) => {
            lines.push(format!("{:<10} {}", "stage", state.stage));
            lines.push(format!(
                "{:<10} {} ({})",
                "source", state.locator, state.method
            ));
            lines.push(format!("{:<10} {}", "revision", state.revision));
            if let Some(head) = &state.head {
                lines.push(format!("{:<10} {head}", "head"));
            }
        }
        None => lines.push(format!("{:<10} none", "stage")),
    }
    lines
}

/// Display the build state.
///
/// # Errors
///
/// Returns an error if the state marker exists but cannot be read.
pub fn run_status_command(ctx: &BuildContext) -> Result<()> {
    let state = ctx.load_state()?;
    for line in status_lines(ctx, state.as_ref()) {
        println!("{line}");
    }
    Ok(())
}
