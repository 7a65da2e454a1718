// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Command executors
//!
//! This module provides the executor trait, the runner that decides how a
//! command string becomes a process, and the subprocess-backed
//! implementation.

mod command;

pub use command::CommandExecutor;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::errors::PiperunError;

/// Name of the runner that interprets commands as one shell string
pub const DEFAULT_RUNNER: &str = "bash";

/// Interpreter used to execute pipeline commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Runner {
    /// `bash -c <command>`; pipes, redirection and `&&` work
    Bash,
    /// Any other executable; the command is split on whitespace into its
    /// arguments and no shell features apply
    Program(String),
}

impl Runner {
    /// Resolve a runner from its name
    pub fn from_name(name: &str) -> Self {
        if name == DEFAULT_RUNNER {
            Self::Bash
        } else {
            Self::Program(name.to_string())
        }
    }

    /// Executable that will be spawned
    pub fn program(&self) -> &str {
        match self {
            Self::Bash => DEFAULT_RUNNER,
            Self::Program(name) => name,
        }
    }

    /// Full argument vector (program first) used to run `command`.
    ///
    /// Non-bash runners get a naive whitespace split: quoted arguments
    /// containing spaces are broken apart.
    pub fn argv(&self, command: &str) -> Vec<String> {
        let mut argv = vec![self.program().to_string()];
        match self {
            Self::Bash => {
                argv.push("-c".to_string());
                argv.push(command.to_string());
            }
            Self::Program(_) => argv.extend(command.split_whitespace().map(str::to_string)),
        }
        argv
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::Bash
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Result of running one command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the command exited with status 0
    pub succeeded: bool,

    /// Standard output
    pub stdout: String,

    /// Standard error
    pub stderr: String,

    /// Exit code, `None` if the process never started or was killed by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,

    /// Why the process could not be started, if it could not
    pub spawn_error: Option<String>,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(stdout: String, duration: Duration) -> Self {
        Self {
            succeeded: true,
            stdout,
            stderr: String::new(),
            exit_code: Some(0),
            duration,
            spawn_error: None,
        }
    }

    /// Create a failed result for a process that ran and exited non-zero
    pub fn failure(stderr: String, exit_code: Option<i32>, duration: Duration) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr,
            exit_code,
            duration,
            spawn_error: None,
        }
    }

    /// Create a failed result for a process that could not be started
    pub fn spawn_failure(error: String, duration: Duration) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            duration,
            spawn_error: Some(error),
        }
    }

    /// Describe a failed result as an error; `None` when it succeeded
    pub fn to_error(&self, command: &str, runner: &Runner) -> Option<PiperunError> {
        if self.succeeded {
            return None;
        }

        Some(match &self.spawn_error {
            Some(error) => PiperunError::CommandSpawn {
                command: command.to_string(),
                runner: runner.to_string(),
                error: error.clone(),
                help: None,
            },
            None => PiperunError::CommandFailed {
                command: command.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.clone(),
            },
        })
    }
}

/// Trait for command executors
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `command` in `working_dir` with `runner`, waiting for it to exit.
    ///
    /// Never fails: spawn errors are reported through
    /// [`ExecutionResult::spawn_error`].
    async fn execute(&self, command: &str, working_dir: &Path, runner: &Runner) -> ExecutionResult;
}
