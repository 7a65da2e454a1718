// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Error types
//!
//! Every failure piperun can hit is one variant of [`PiperunError`]. The
//! pipeline director logs these with their help text and turns them into a
//! failed [`Outcome`](crate::pipeline::Outcome); none of them reach `main`.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for piperun operations
pub type PiperunResult<T> = Result<T, PiperunError>;

/// Main error type for piperun
#[derive(Error, Debug, Diagnostic)]
pub enum PiperunError {
    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Config file not found: {path}")]
    #[diagnostic(
        code(piperun::config_not_found),
        help("Create a sample config with 'piperun init' or point --pipeline-config at an existing file")
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read config '{path}': {error}")]
    #[diagnostic(code(piperun::config_read_error))]
    ConfigRead { path: PathBuf, error: String },

    #[error("Failed to parse config '{path}': {reason}")]
    #[diagnostic(code(piperun::config_parse_error))]
    ConfigParse {
        path: PathBuf,
        reason: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Filesystem Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to create pipeline directory '{path}': {error}")]
    #[diagnostic(
        code(piperun::directory_create_error),
        help("Check that the parent directory is writable")
    )]
    DirectoryCreate { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(piperun::file_write_error))]
    FileWrite { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Could not start '{command}' with runner '{runner}': {error}")]
    #[diagnostic(code(piperun::command_spawn_error))]
    CommandSpawn {
        command: String,
        runner: String,
        error: String,
        #[help]
        help: Option<String>,
    },

    #[error("Command '{command}' exited with {}", describe_exit(.exit_code))]
    #[diagnostic(code(piperun::command_failed))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("YAML error: {message}")]
    #[diagnostic(code(piperun::yaml_error))]
    Yaml { message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl From<serde_yaml::Error> for PiperunError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl PiperunError {
    /// Create a parse error for a config file
    pub fn config_parse(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.to_path_buf(),
            reason: reason.into(),
            help: None,
        }
    }

    /// Create a spawn error, adding a PATH hint when the runner is not installed
    pub fn command_spawn(command: &str, runner: &str, error: &std::io::Error) -> Self {
        let help = if error.kind() == std::io::ErrorKind::NotFound && which::which(runner).is_err() {
            Some(format!(
                "'{}' was not found in PATH. Install it or pass a different --runner",
                runner
            ))
        } else if error.kind() == std::io::ErrorKind::PermissionDenied {
            Some(format!("'{}' is not executable by the current user", runner))
        } else {
            None
        };

        Self::CommandSpawn {
            command: command.to_string(),
            runner: runner.to_string(),
            error: error.to_string(),
            help,
        }
    }

    /// The help text attached to this error, if any
    pub fn help_text(&self) -> Option<String> {
        Diagnostic::help(self).map(|h| h.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = PiperunError::CommandFailed {
            command: "false".into(),
            exit_code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "Command 'false' exited with status 1");

        let err = PiperunError::CommandFailed {
            command: "sleep 100".into(),
            exit_code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_spawn_error_hints_missing_runner() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = PiperunError::command_spawn("--version", "piperun-no-such-runner", &io);

        let help = err.help_text().unwrap();
        assert!(help.contains("piperun-no-such-runner"));
        assert!(help.contains("PATH"));
    }

    #[test]
    fn test_config_not_found_has_help() {
        let err = PiperunError::ConfigNotFound {
            path: PathBuf::from("missing.yaml"),
        };
        assert!(err.help_text().unwrap().contains("piperun init"));
    }
}
