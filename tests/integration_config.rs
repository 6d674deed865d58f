// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the config module with realistic `key = value` files.

use std::path::{Path, PathBuf};

use datatybe_build::config::loader::ConfigLoader;
use datatybe_build::config::{DEFAULT_BUILD_JOBS, Settings, keys};
use datatybe_build::error::ConfigError;
use datatybe_build::layout::BuildLayout;

const BUILD_CONF: &str = "\
# ReproMPI
build_dir = /tmp/b
git_reprompi_bench = /local/repo
sha1_reprompi_bench = deadbeef

code_generator_script = scripts/generate.py
gen_code_dirname = gen
path_to_list_of_source_files = config/sources.txt
reprompi_default_cmake_options = -DCMAKE_BUILD_TYPE=Release
";

fn write_conf(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("build.conf");
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Shipped configuration
// =============================================================================

#[test]
fn config_shipped_sample_loads() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let settings = Settings::from_file(root.join("config/build.conf"), root).unwrap();

    assert_eq!(settings.build_dir, root.join("build"));
    assert_eq!(settings.gen_code_dirname, "mpi-datatybe");
    assert_eq!(settings.build_jobs, DEFAULT_BUILD_JOBS);
    assert!(settings.tools.git.is_none());
}

#[test]
fn config_shipped_source_list_exists_in_generator_input() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let settings = Settings::from_file(root.join("config/build.conf"), root).unwrap();
    let layout = BuildLayout::from_settings(&settings).unwrap();

    assert_eq!(layout.benchmark_source_dir(), root.join("bench"));
    let listed = std::fs::read_to_string(layout.source_list()).unwrap();
    let missing: Vec<&str> = listed
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| !layout.benchmark_source_dir().join(name).is_file())
        .collect();
    assert!(missing.is_empty(), "missing listed sources: {missing:?}");
}

#[test]
fn config_benchmark_source_dir_defaults_to_bench() {
    let settings = Settings::builder("/project").add_str(BUILD_CONF).build().unwrap();
    assert_eq!(settings.benchmark_source_dir, PathBuf::from("/project/bench"));

    let settings = Settings::builder("/project")
        .add_str(BUILD_CONF)
        .set(keys::BENCHMARK_SOURCE_DIR, "/srv/bench")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(settings.benchmark_source_dir, PathBuf::from("/srv/bench"));
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_load_twice_is_equal() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_conf(temp.path(), BUILD_CONF);

    let first = Settings::from_file(&path, "/project").unwrap();
    let second = Settings::from_file(&path, "/project").unwrap();
    assert_eq!(first.raw(), second.raw());
    assert_eq!(first.build_dir, PathBuf::from("/tmp/b"));
    assert_eq!(
        first.source_list,
        PathBuf::from("/project/config/sources.txt")
    );
}

#[test]
fn config_malformed_line_fails_whole_load() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_conf(temp.path(), &format!("{BUILD_CONF}this line has no separator\n"));

    let err = Settings::from_file(&path, "/project").unwrap_err();
    let Some(ConfigError::MalformedLine { line_number, .. }) = err.downcast_ref::<ConfigError>()
    else {
        panic!("expected a malformed line error, got {err:#}");
    };
    assert_eq!(*line_number, 10);
}

#[test]
fn config_missing_file() {
    let err = Settings::from_file("/nonexistent/datatybe.conf", "/project").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/datatybe.conf"));
}

#[test]
fn config_missing_required_key() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_conf(temp.path(), "build_dir = /tmp/b\n");

    let err = Settings::from_file(&path, "/project").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingKey { .. })
    ));
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_overrides_win_over_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_conf(temp.path(), BUILD_CONF);

    let settings = ConfigLoader::new("/project")
        .add_file(&path)
        .set_all(["build_dir=/scratch/b", "build_jobs = 16"])
        .unwrap()
        .set(keys::REPROMPI_REVISION, "cafebabe")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(settings.build_dir, PathBuf::from("/scratch/b"));
    assert_eq!(settings.build_jobs, 16);
    assert_eq!(settings.reprompi_revision, "cafebabe");
    assert_eq!(settings.reprompi_locator, "/local/repo");
}

#[test]
fn config_env_overrides_file() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("DATATYBETEST_GEN_CODE_DIRNAME", "from-env");
    }

    let settings = ConfigLoader::new("/project")
        .add_str(BUILD_CONF)
        .with_env_prefix("DATATYBETEST")
        .build()
        .unwrap();

    assert_eq!(settings.gen_code_dirname, "from-env");

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("DATATYBETEST_GEN_CODE_DIRNAME");
    }
}

#[test]
fn config_format_options() {
    let settings = ConfigLoader::new("/project")
        .add_str("build_dir = /tmp/b\ngit_reprompi_bench = /local/repo\n")
        .set_all([
            "sha1_reprompi_bench=deadbeef",
            "code_generator_script=g.py",
            "gen_code_dirname=gen",
            "path_to_list_of_source_files=l.txt",
        ])
        .unwrap()
        .build()
        .unwrap();

    let lines = settings.format_options();
    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&"gen_code_dirname             = gen".to_string()));
}
