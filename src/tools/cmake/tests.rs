// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use super::{CACHE_DIR, CACHE_FILE, CmakeTool};
use crate::options::CmakeOptions;
use crate::tools::test_utils::{
    dry_run_lines, fake_tool, fake_tool_calls, run_with_logs, settings_with, test_settings,
};
use crate::tools::{Tool, ToolContext};

#[test]
fn test_configure_args_put_source_last() {
    let tool = CmakeTool::new()
        .source_dir("/tmp/b/reprompi")
        .options(CmakeOptions::parse("-DENABLE_RDTSCP=ON -Wno-dev"));
    insta::assert_snapshot!(tool.configure_args().unwrap().join(" "), @"-DENABLE_RDTSCP=ON -Wno-dev /tmp/b/reprompi");
}

#[test]
fn test_build_dir_defaults_to_source() {
    let in_tree = CmakeTool::new().source_dir("/src");
    assert_eq!(in_tree.effective_build_dir().unwrap().to_str(), Some("/src"));

    let out_of_tree = CmakeTool::new().source_dir("/src").build_dir("/build");
    assert_eq!(
        out_of_tree.effective_build_dir().unwrap().to_str(),
        Some("/build")
    );

    assert!(CmakeTool::new().effective_build_dir().is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn test_cmake_configure_dry_run() -> Result<()> {
    let logs = run_with_logs(|| async {
        let ctx = ToolContext::new(test_settings(), CancellationToken::new(), true);

        CmakeTool::new()
            .source_dir("/tmp/b/mpi-datatybe")
            .options(CmakeOptions::parse("-DREPRO_MPI_BENCHMARK_DIR=/tmp/b/repo"))
            .run(&ctx)
            .await
    })
    .await?;

    insta::assert_snapshot!(dry_run_lines(&logs), @"[dry-run] Would configure CMake build=/tmp/b/mpi-datatybe args=-DREPRO_MPI_BENCHMARK_DIR=/tmp/b/repo /tmp/b/mpi-datatybe");
    Ok(())
}

#[tokio::test]
async fn test_configure_clears_cache_and_runs_in_build_dir() {
    let temp = tempfile::tempdir().unwrap();
    let bin = temp.path().join("bin");
    let source = temp.path().join("reprompi");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::create_dir_all(source.join(CACHE_DIR).join("3.28.3")).unwrap();
    std::fs::write(source.join(CACHE_FILE), "stale").unwrap();
    std::fs::write(source.join("CMakeLists.txt"), "").unwrap();

    let cmake = fake_tool(&bin, "cmake", "exit 0");
    let settings = settings_with(&format!("cmake_executable = {}\n", cmake.display()));
    let ctx = ToolContext::new(settings, CancellationToken::new(), false);

    CmakeTool::new()
        .source_dir(&source)
        .options(CmakeOptions::parse("-DENABLE_RDTSCP=ON"))
        .run(&ctx)
        .await
        .unwrap();

    assert!(!source.join(CACHE_FILE).exists());
    assert!(!source.join(CACHE_DIR).exists());
    assert!(source.join("CMakeLists.txt").exists());
    assert_eq!(
        fake_tool_calls(&bin, "cmake"),
        vec![format!(
            "{}|-DENABLE_RDTSCP=ON {}",
            source.display(),
            source.display()
        )]
    );
}

#[tokio::test]
async fn test_configure_failure_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let cmake = fake_tool(
        temp.path(),
        "cmake",
        "echo 'CMake Error: The source directory does not exist.' 1>&2\nexit 1",
    );
    let settings = settings_with(&format!("cmake_executable = {}\n", cmake.display()));
    let ctx = ToolContext::new(settings, CancellationToken::new(), false);

    let err = CmakeTool::new()
        .source_dir(temp.path())
        .run(&ctx)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("CMake Error"));
}
