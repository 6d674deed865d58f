// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::{CommandFactory, Parser};
use datatybe_build::cli::{Cli, Command};
use datatybe_build::options::{CompilerType, SyncType};

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

// =============================================================================
// Configure / All
// =============================================================================

#[test]
fn cli_configure_full_variant() {
    let cli = Cli::try_parse_from([
        "datatybe",
        "configure",
        "--git",
        "https://github.com/hunsa/reprompi.git",
        "--sha1",
        "deadbeef",
        "--synctype",
        "skampi",
        "--compilertype",
        "intel",
        "--cpufreq",
        "2300",
    ])
    .unwrap();

    let Some(Command::Configure(args)) = cli.command else {
        panic!("expected configure");
    };
    let variant = args.variant.variant();
    assert_eq!(variant.sync_type, Some(SyncType::Skampi));
    assert_eq!(variant.compiler_type, Some(CompilerType::Intel));
    assert!(!variant.rdtscp);
    assert!(!args.variant.reacquire());

    let args: Vec<String> = variant.reprompi_options().to_args();
    insta::assert_snapshot!(args.join(" "), @"-DFREQUENCY_MHZ=2300 -DENABLE_BENCHMARK_BARRIER=OFF -DENABLE_WINDOWSYNC_HCA=OFF -DENABLE_WINDOWSYNC_JK=OFF -DENABLE_WINDOWSYNC_SK=ON -DINCLUDE_PLATFORM_CONFIG_FILE=platform_files/intel_compiler.cmake");
}

#[test]
fn cli_all_with_clean() {
    let cli = Cli::try_parse_from(["datatybe", "--dry", "all", "--clean", "--rdtscp"]).unwrap();

    assert!(cli.global.dry);
    let Some(Command::All(args)) = cli.command else {
        panic!("expected all");
    };
    assert!(args.variant.clean);
    assert!(args.variant.rdtscp);
}

#[test]
fn cli_rejects_unknown_compilertype() {
    let err = Cli::try_parse_from(["datatybe", "configure", "--compilertype", "gcc"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn cli_clone_rejects_variant_flags() {
    assert!(Cli::try_parse_from(["datatybe", "clone", "--rdtscp"]).is_err());
}

// =============================================================================
// Read-only commands
// =============================================================================

#[test]
fn cli_options_and_status() {
    let cli = Cli::try_parse_from(["datatybe", "-s", "build_dir=/x", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
    assert_eq!(cli.global.options, vec!["build_dir=/x"]);

    let cli = Cli::try_parse_from(["datatybe", "status", "--log-file", "run.log"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Status)));
    assert_eq!(
        cli.global.log_file.as_deref(),
        Some(std::path::Path::new("run.log"))
    );
}
