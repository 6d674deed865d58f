// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use super::BuildContext;
use super::compile::{require_configured, run_compile_command, run_instructions};
use super::configure::{configure, require_cloned};
use super::info::status_lines;
use crate::cmd::clone::run_clone_command;
use crate::config::Settings;
use crate::error::PreconditionError;
use crate::options::{BuildVariant, SyncType};
use crate::state::{AcquireMethod, BuildState, Stage};
use crate::tools::test_utils::{fake_tool, fake_tool_calls};

const COPYING_GIT: &str = "\
if [ \"$1\" = clone ]; then cp -R \"$3\" \"$4\"; fi
exit 0";

/// Generator stand-in: creates the output directory (`-o`).
const GENERATOR: &str = "mkdir -p \"$4\"";

struct Fixture {
    _temp: tempfile::TempDir,
    root: PathBuf,
    bin: PathBuf,
    upstream: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("project");
        let bin = temp.path().join("bin");
        let upstream = temp.path().join("upstream/reprompi");
        std::fs::create_dir_all(root.join("bench")).unwrap();
        std::fs::create_dir_all(root.join("config")).unwrap();
        std::fs::write(root.join("config/sources.txt"), "bcast.c\n").unwrap();
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(upstream.join("scripts")).unwrap();
        std::fs::write(upstream.join("CMakeLists.txt"), "project(reprompi)").unwrap();
        fake_tool(&upstream.join("scripts"), "generate.sh", GENERATOR);
        fake_tool(&bin, "git", COPYING_GIT);
        fake_tool(&bin, "cmake", "exit 0");
        fake_tool(&bin, "make", "exit 0");
        Self {
            _temp: temp,
            root,
            bin,
            upstream,
        }
    }

    fn context_with(&self, dry_run: bool, extra: &str) -> BuildContext {
        let settings = Settings::builder(&self.root)
            .add_str(&format!(
                "build_dir = build\n\
                 git_reprompi_bench = {}\n\
                 sha1_reprompi_bench = deadbeef\n\
                 code_generator_script = scripts/generate.sh\n\
                 gen_code_dirname = mpi-datatybe\n\
                 path_to_list_of_source_files = config/sources.txt\n\
                 reprompi_default_cmake_options = -DENABLE_WINDOWSYNC_HCA=ON\n\
                 git_executable = {}\n\
                 cmake_executable = {}\n\
                 make_executable = {}\n\
                 {extra}",
                self.upstream.display(),
                self.bin.join("git").display(),
                self.bin.join("cmake").display(),
                self.bin.join("make").display(),
            ))
            .build()
            .unwrap();
        BuildContext::new(settings, dry_run, CancellationToken::new()).unwrap()
    }

    fn context(&self) -> BuildContext {
        self.context_with(false, "")
    }

    fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }
}

#[test]
fn test_context_derives_layout() {
    let fx = Fixture::new();
    let ctx = fx.context();

    assert_eq!(ctx.root(), fx.root.as_path());
    assert_eq!(ctx.layout().source_tree(), fx.build_dir().join("reprompi"));
    assert_eq!(ctx.layout().generated_dir(), fx.build_dir().join("mpi-datatybe"));
    assert!(!ctx.tool_context().is_dry_run());
}

#[tokio::test]
async fn test_clone_records_state() {
    let fx = Fixture::new();
    let ctx = fx.context();

    run_clone_command(&ctx).await.unwrap();

    let state = ctx.load_state().unwrap().unwrap();
    assert_eq!(state.stage, Stage::Cloned);
    assert_eq!(state.method, AcquireMethod::Git);
    assert_eq!(state.revision, "deadbeef");
    assert!(ctx.layout().source_tree().join("CMakeLists.txt").exists());
}

#[test]
fn test_configure_requires_clone() {
    let fx = Fixture::new();
    let ctx = fx.context();

    let err = require_cloned(&ctx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PreconditionError>(),
        Some(PreconditionError::NotCloned { .. })
    ));
    assert!(err.to_string().contains("datatybe clone"));
}

#[test]
fn test_tree_without_marker_is_not_cloned() {
    let fx = Fixture::new();
    let ctx = fx.context();
    std::fs::create_dir_all(ctx.layout().source_tree()).unwrap();

    assert!(require_cloned(&ctx).is_err());

    BuildState::cloned(AcquireMethod::Copy, "x", "y", None)
        .save(&ctx.layout().state_file())
        .unwrap();
    assert!(require_cloned(&ctx).is_ok());
}

#[test]
fn test_preconditions_only_warn_in_dry_run() {
    let fx = Fixture::new();
    let ctx = fx.context_with(true, "");

    assert!(require_cloned(&ctx).is_ok());
    assert!(require_configured(&ctx).is_ok());
}

#[tokio::test]
async fn test_compile_requires_configure() {
    let fx = Fixture::new();
    let ctx = fx.context();

    let err = require_configured(&ctx).unwrap_err();
    assert!(err.to_string().contains("Build directory does not exist"));

    run_clone_command(&ctx).await.unwrap();
    let err = run_compile_command(&ctx).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("The mpi-datatybe generated code does not exist"));
    assert!(message.contains("datatybe configure"));
    assert!(fake_tool_calls(&fx.bin, "make").is_empty());
}

#[tokio::test]
async fn test_failing_generator_stops_configure() {
    let fx = Fixture::new();
    fake_tool(&fx.upstream.join("scripts"), "generate.sh", "exit 3");
    let ctx = fx.context();

    let err = configure(&ctx, &BuildVariant::default(), false, true)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("exited with code 3"));
    assert_eq!(fake_tool_calls(&fx.upstream.join("scripts"), "generate.sh").len(), 1);
    assert!(fake_tool_calls(&fx.bin, "cmake").is_empty());
    assert_eq!(ctx.load_state().unwrap().unwrap().stage, Stage::Cloned);
}

#[tokio::test]
async fn test_configure_then_compile() {
    let fx = Fixture::new();
    let ctx = fx.context();
    let variant = BuildVariant {
        sync_type: Some(SyncType::Jk),
        ..BuildVariant::default()
    };

    configure(&ctx, &variant, false, true).await.unwrap();
    assert_eq!(ctx.load_state().unwrap().unwrap().stage, Stage::Configured);

    let tree = ctx.layout().source_tree();
    let generated = ctx.layout().generated_dir();
    let cmake = fake_tool_calls(&fx.bin, "cmake");
    assert_eq!(cmake.len(), 2);
    assert_eq!(
        cmake[0],
        format!(
            "{}|-DENABLE_BENCHMARK_BARRIER=OFF -DENABLE_WINDOWSYNC_HCA=OFF \
             -DENABLE_WINDOWSYNC_JK=ON -DENABLE_WINDOWSYNC_SK=OFF {}",
            tree.display(),
            tree.display()
        )
    );
    assert_eq!(
        cmake[1],
        format!(
            "{}|-DREPRO_MPI_BENCHMARK_DIR={} {}",
            generated.display(),
            tree.display(),
            generated.display()
        )
    );

    run_compile_command(&ctx).await.unwrap();
    assert_eq!(ctx.load_state().unwrap().unwrap().stage, Stage::Compiled);
    assert_eq!(
        fake_tool_calls(&fx.bin, "make"),
        vec![
            format!("{}|-j 4", tree.display()),
            format!("{}|-j 4 install", tree.display()),
            format!("{}|-j 4", generated.display()),
        ]
    );
}

#[tokio::test]
async fn test_configure_clean_removes_build_dir() {
    let fx = Fixture::new();
    let ctx = fx.context();
    std::fs::create_dir_all(fx.build_dir().join("leftover")).unwrap();

    configure(&ctx, &BuildVariant::default(), true, true)
        .await
        .unwrap();

    assert!(!fx.build_dir().join("leftover").exists());
    assert_eq!(ctx.load_state().unwrap().unwrap().stage, Stage::Configured);
}

#[tokio::test]
async fn test_dry_run_changes_nothing() {
    let fx = Fixture::new();
    let ctx = fx.context_with(true, "");

    configure(&ctx, &BuildVariant::default(), true, true)
        .await
        .unwrap();
    run_compile_command(&ctx).await.unwrap();

    assert!(!fx.build_dir().exists());
    for tool in ["git", "cmake", "make"] {
        assert!(fake_tool_calls(&fx.bin, tool).is_empty(), "{tool} was run");
    }
}

#[tokio::test]
async fn test_status_lines() {
    let fx = Fixture::new();
    let ctx = fx.context();

    let before = status_lines(&ctx, None);
    assert_eq!(before.len(), 4);
    assert!(before[0].ends_with("(missing)"));
    assert_eq!(before[3], "stage      none");

    run_clone_command(&ctx).await.unwrap();
    let state = ctx.load_state().unwrap();
    let after = status_lines(&ctx, state.as_ref());
    assert!(after[0].starts_with("build      "));
    assert!(after[1].ends_with("(present)"));
    assert!(after[2].ends_with("(missing)"));
    assert!(after.contains(&"stage      cloned".to_string()));
    assert!(after.contains(&"revision   deadbeef".to_string()));
}

#[test]
fn test_run_instructions() {
    let fx = Fixture::new();
    let ctx = fx.context();
    let lines = run_instructions(ctx.layout());

    assert_eq!(
        lines[1],
        format!(
            "  export LD_LIBRARY_PATH={}:$LD_LIBRARY_PATH",
            fx.build_dir().join("reprompi/lib").display()
        )
    );
    assert_eq!(
        lines[2],
        format!("  cd {}", fx.build_dir().join("mpi-datatybe").display())
    );
    assert!(lines[3].starts_with("  mpirun -np 4 ./bin/reprompibench"));
}
