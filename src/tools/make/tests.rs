// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use super::MakeTool;
use crate::tools::test_utils::{
    dry_run_lines, fake_tool, fake_tool_calls, run_with_logs, settings_with, test_settings,
};
use crate::tools::{Tool, ToolContext};

#[test]
fn test_make_args() {
    assert_eq!(MakeTool::new().make_args(4), vec!["-j", "4"]);
    assert_eq!(
        MakeTool::new().install_op().make_args(16),
        vec!["-j", "16", "install"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_make_dry_run_uses_configured_jobs() -> Result<()> {
    let logs = run_with_logs(|| async {
        let ctx = ToolContext::new(
            settings_with("build_jobs = 8\n"),
            CancellationToken::new(),
            true,
        );
        MakeTool::new().dir("/tmp/b/repo").install_op().run(&ctx).await
    })
    .await?;

    insta::assert_snapshot!(dry_run_lines(&logs), @"[dry-run] Would run make dir=/tmp/b/repo args=-j 8 install");
    Ok(())
}

#[tokio::test]
async fn test_make_requires_dir() {
    let ctx = ToolContext::new(test_settings(), CancellationToken::new(), false);
    assert!(MakeTool::new().run(&ctx).await.is_err());
}

#[tokio::test]
async fn test_build_then_install_are_separate_calls() {
    let temp = tempfile::tempdir().unwrap();
    let make = fake_tool(temp.path(), "make", "exit 0");
    let settings = settings_with(&format!("make_executable = {}\n", make.display()));
    let ctx = ToolContext::new(settings, CancellationToken::new(), false);

    MakeTool::new().dir(temp.path()).run(&ctx).await.unwrap();
    MakeTool::new()
        .dir(temp.path())
        .install_op()
        .run(&ctx)
        .await
        .unwrap();

    let dir = temp.path().display().to_string();
    assert_eq!(
        fake_tool_calls(temp.path(), "make"),
        vec![format!("{dir}|-j 4"), format!("{dir}|-j 4 install")]
    );
}

#[tokio::test]
async fn test_make_failure_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let make = fake_tool(temp.path(), "make", "echo 'make: *** [all] Error 2'\nexit 2");
    let settings = settings_with(&format!("make_executable = {}\n", make.display()));
    let ctx = ToolContext::new(settings, CancellationToken::new(), false);

    let err = MakeTool::new().dir(temp.path()).run(&ctx).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to compile"));
    assert!(message.contains("exited with code 2"));
}
