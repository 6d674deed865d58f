// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture for processes.
//!
//! ```text
//! run_child(token)
//!   stdout reader task --\
//!                         >-- one unbounded channel (arrival order)
//!   stderr reader task --/
//!   wait (or cancel)
//!   --> ProcessOutput { exit_code, output, interrupted }
//! ```

use crate::error::Result;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput};

/// Spawns a task forwarding every line of `reader` into `tx`.
fn spawn_reader<R>(
    reader: Option<R>,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    reader.map(|reader| {
        let name = process_name.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        trace!(process = %name, stream = %stream_name, line = %line, "output");
                        let _ = tx.send(line);
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(process = %name, stream = %stream_name, error = %e, "error reading stream");
                        break;
                    }
                }
            }
        })
    })
}

/// Collects all buffered lines into one string.
fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

/// Waits for reader tasks to complete.
async fn await_readers(handles: [Option<JoinHandle<()>>; 2]) {
    for handle in handles.into_iter().flatten() {
        let _ = handle.await;
    }
}

impl ProcessBuilder {
    /// Runs the child process, capturing merged output until it exits or is
    /// cancelled.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handles = [
            spawn_reader(child.stdout.take(), name, "stdout", tx.clone()),
            spawn_reader(child.stderr.take(), name, "stderr", tx),
        ];

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
        };

        await_readers(handles).await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            collect_output(&mut rx),
            interrupted,
        ))
    }
}
