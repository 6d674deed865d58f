// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for tool tests.
//!
//! Provides log-capturing infrastructure for testing dry-run output, fake
//! tool scripts, and a minimal settings fixture.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::Settings;

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing tracing output.
///
/// Returns the captured log output as a string.
pub(crate) async fn run_with_logs<F, Fut>(f: F) -> Result<String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .without_time()
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    f().await?;

    let guard = buffer
        .lock()
        .map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8_lossy(&guard).to_string())
}

/// Keeps only the `[dry-run]` part of each captured line.
pub(crate) fn dry_run_lines(logs: &str) -> String {
    logs.lines()
        .filter_map(|line| line.find("[dry-run]").map(|idx| &line[idx..]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings fixture rooted at `/project` with build dir `/tmp/b`.
pub(crate) fn test_settings() -> Arc<Settings> {
    settings_with("")
}

/// Settings fixture with extra `key = value` lines appended.
pub(crate) fn settings_with(extra: &str) -> Arc<Settings> {
    let settings = Settings::builder("/project")
        .add_str(&format!(
            "build_dir = /tmp/b\n\
             git_reprompi_bench = /local/repo\n\
             sha1_reprompi_bench = deadbeef\n\
             code_generator_script = bin/generate.sh\n\
             gen_code_dirname = mpi-datatybe\n\
             path_to_list_of_source_files = config/sources.txt\n\
             {extra}"
        ))
        .build()
        .expect("test settings should load");
    Arc::new(settings)
}

/// Writes an executable shell script that appends its arguments and working
/// directory to `<dir>/<name>.log`, then runs `body`.
pub(crate) fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let log = dir.join(format!("{name}.log"));
    let script = format!(
        "#!/bin/sh\necho \"$(pwd)|$*\" >> '{}'\n{body}\n",
        log.display()
    );
    {
        let mut file = std::fs::File::create(&path).expect("create fake tool");
        file.write_all(script.as_bytes()).expect("write fake tool");
        file.sync_all().expect("sync fake tool");
    }
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake tool");
    path
}

/// Reads the invocation log of a fake tool, one `cwd|args` line per call.
pub(crate) fn fake_tool_calls(dir: &Path, name: &str) -> Vec<String> {
    std::fs::read_to_string(dir.join(format!("{name}.log")))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}
