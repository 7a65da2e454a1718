// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Subprocess executor
//!
//! Runs one command as a child process in the pipeline directory.

use async_trait::async_trait;
use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use super::{ExecutionResult, Executor, Runner};
use crate::errors::PiperunError;

/// Executor backed by `tokio::process`
pub struct CommandExecutor;

impl CommandExecutor {
    /// Create a new command executor
    pub fn new() -> Self {
        Self
    }

    fn build_command(command: &str, working_dir: &Path, runner: &Runner) -> Command {
        let mut argv = runner.argv(command).into_iter();
        // argv always starts with the runner program
        let program = argv.next().unwrap_or_else(|| runner.program().to_string());

        let mut cmd = Command::new(program);
        cmd.args(argv);
        cmd.current_dir(working_dir);
        cmd.stdin(std::process::Stdio::null());
        cmd
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode captured bytes, warning when they were not valid UTF-8
fn decode_stream(bytes: &[u8], stream: &str, command: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!(
                "{} of '{}' is not valid UTF-8; invalid bytes were replaced",
                stream, command
            );
            text
        }
    }
}

#[async_trait]
impl Executor for CommandExecutor {
    async fn execute(&self, command: &str, working_dir: &Path, runner: &Runner) -> ExecutionResult {
        info!("Running command: {}", command);
        debug!(
            "argv={:?} cwd={}",
            runner.argv(command),
            working_dir.display()
        );

        let start = Instant::now();
        let output = match Self::build_command(command, working_dir, runner).output().await {
            Ok(output) => output,
            Err(e) => {
                let err = PiperunError::command_spawn(command, runner.program(), &e);
                error!("Error running command '{}': {}", command, err);
                if let Some(help) = err.help_text() {
                    error!("  help: {}", help);
                }
                return ExecutionResult::spawn_failure(e.to_string(), start.elapsed());
            }
        };

        let duration = start.elapsed();
        let stdout = decode_stream(&output.stdout, "stdout", command);
        let stderr = decode_stream(&output.stderr, "stderr", command);

        if output.status.success() {
            info!("Command succeeded: {}", command);
            if !stdout.is_empty() {
                info!("Output: {}", stdout);
            }

            ExecutionResult {
                stderr,
                ..ExecutionResult::success(stdout, duration)
            }
        } else {
            error!("Command failed: {}", command);
            if !stderr.is_empty() {
                error!("Error: {}", stderr);
            }

            ExecutionResult {
                stdout,
                ..ExecutionResult::failure(stderr, output.status.code(), duration)
            }
        }
    }
}
