// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Pipeline director
//!
//! Drives the three actions. `run` loads the config, prepares the pipeline
//! directory and executes items one at a time, stopping at the first
//! failure. `init` prepares the directory and writes a sample config.
//! `status` reports what exists on disk.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::errors::{PiperunError, PiperunResult};
use crate::executors::{CommandExecutor, Executor, Runner};
use crate::pipeline::{PipelineConfig, StepSource, FALLBACK_COMMANDS};

/// Terminal state of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Succeeded => 0,
            Self::Failed => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }
}

/// Result of a `run`
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal state
    pub outcome: Outcome,
    /// Items whose command was executed, including the failing one
    pub executed: usize,
    /// Steps skipped because they had no command
    pub skipped: usize,
    /// 1-based index of the item that failed
    pub failed_at: Option<usize>,
    /// Total time spent
    pub duration: Duration,
}

impl RunReport {
    fn aborted(start: Instant) -> Self {
        Self {
            outcome: Outcome::Failed,
            executed: 0,
            skipped: 0,
            failed_at: None,
            duration: start.elapsed(),
        }
    }
}

/// What `status` found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub pipeline_dir: PathBuf,
    pub dir_exists: bool,
    /// Names of the directory's immediate children, sorted
    pub entries: Vec<String>,
    pub config_path: PathBuf,
    pub config_exists: bool,
}

/// One item resolved from the config's source
struct PlanItem {
    /// "Step", "Command" or "Sample command"
    kind: &'static str,
    /// Step name or the command itself
    label: String,
    command: Option<String>,
}

fn plan(source: &StepSource) -> Vec<PlanItem> {
    match source {
        StepSource::Steps(steps) => steps
            .iter()
            .map(|step| PlanItem {
                kind: "Step",
                label: step.display_name().to_string(),
                command: step.command.clone(),
            })
            .collect(),
        StepSource::Commands(commands) => commands
            .iter()
            .map(|command| PlanItem {
                kind: "Command",
                label: command.clone(),
                command: Some(command.clone()),
            })
            .collect(),
        StepSource::Fallback => FALLBACK_COMMANDS
            .iter()
            .map(|command| PlanItem {
                kind: "Sample command",
                label: command.to_string(),
                command: Some(command.to_string()),
            })
            .collect(),
    }
}

/// Log an error together with its help text
fn log_error(err: &PiperunError) {
    error!("{}", err);
    if let Some(help) = err.help_text() {
        error!("  help: {}", help);
    }
}

/// Orchestrates pipeline actions over one config file and one directory
pub struct PipelineDirector<E: Executor = CommandExecutor> {
    config_path: PathBuf,
    pipeline_dir: PathBuf,
    runner: Runner,
    executor: E,
}

impl PipelineDirector<CommandExecutor> {
    /// Create a director that runs commands as real subprocesses
    pub fn new(config_path: impl Into<PathBuf>, pipeline_dir: impl Into<PathBuf>, runner: Runner) -> Self {
        Self::with_executor(config_path, pipeline_dir, runner, CommandExecutor::new())
    }
}

impl<E: Executor> PipelineDirector<E> {
    /// Create a director with a custom executor
    pub fn with_executor(
        config_path: impl Into<PathBuf>,
        pipeline_dir: impl Into<PathBuf>,
        runner: Runner,
        executor: E,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            pipeline_dir: pipeline_dir.into(),
            runner,
            executor,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn pipeline_dir(&self) -> &Path {
        &self.pipeline_dir
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Execute the pipeline
    pub async fn run(&self) -> RunReport {
        let start = Instant::now();

        let config = match PipelineConfig::load(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                log_error(&e);
                return RunReport::aborted(start);
            }
        };
        info!("Loaded config from {}", self.config_path.display());
        if let Some(name) = &config.name {
            debug!("Pipeline name: {}", name);
        }

        if let Err(e) = self.ensure_directory() {
            log_error(&e);
            return RunReport::aborted(start);
        }

        if config.source == StepSource::Fallback {
            warn!("No steps or commands found in config. Running sample pipeline...");
        }

        let mut report = RunReport {
            outcome: Outcome::Succeeded,
            executed: 0,
            skipped: 0,
            failed_at: None,
            duration: Duration::ZERO,
        };

        for (i, item) in plan(&config.source).iter().enumerate() {
            let index = i + 1;
            info!("Executing {} {}: {}", item.kind.to_lowercase(), index, item.label);

            let Some(command) = item.command.as_deref() else {
                info!("{} {} has no command, skipping", item.kind, index);
                report.skipped += 1;
                continue;
            };

            let result = self
                .executor
                .execute(command, &self.pipeline_dir, &self.runner)
                .await;
            report.executed += 1;

            if let Some(e) = result.to_error(command, &self.runner) {
                // spawn errors were already logged by the executor, with help
                if result.spawn_error.is_none() {
                    log_error(&e);
                }
                error!("{} {} failed", item.kind, index);
                report.outcome = Outcome::Failed;
                report.failed_at = Some(index);
                report.duration = start.elapsed();
                return report;
            }
        }

        report.duration = start.elapsed();
        info!(
            "Pipeline execution completed successfully in {:.2}s",
            report.duration.as_secs_f64()
        );
        report
    }

    /// Prepare the pipeline directory and write a sample config if none exists
    pub fn init(&self) -> Outcome {
        if let Err(e) = self.ensure_directory() {
            log_error(&e);
            return Outcome::Failed;
        }
        info!("Pipeline initialized successfully");

        if self.config_path.exists() {
            info!(
                "Config file already exists, leaving it untouched: {}",
                self.config_path.display()
            );
            return Outcome::Succeeded;
        }

        match self.write_sample_config() {
            Ok(()) => {
                info!("Created sample config at {}", self.config_path.display());
                Outcome::Succeeded
            }
            Err(e) => {
                log_error(&e);
                Outcome::Failed
            }
        }
    }

    /// Report what exists on disk; never fails
    pub fn status(&self) -> StatusReport {
        let dir_exists = self.pipeline_dir.is_dir();
        let mut entries = Vec::new();

        if dir_exists {
            info!("Pipeline directory exists: {}", self.pipeline_dir.display());
            match list_entries(&self.pipeline_dir) {
                Ok(names) => entries = names,
                Err(e) => warn!(
                    "Could not list pipeline directory {}: {}",
                    self.pipeline_dir.display(),
                    e
                ),
            }

            if entries.is_empty() {
                info!("Pipeline directory is empty");
            } else {
                info!("Pipeline directory contents:");
                for name in &entries {
                    info!("  - {}", name);
                }
            }
        } else {
            info!("Pipeline directory does not exist: {}", self.pipeline_dir.display());
        }

        let config_exists = self.config_path.exists();
        if config_exists {
            info!("Config file exists: {}", self.config_path.display());
        } else {
            info!("Config file does not exist: {}", self.config_path.display());
        }

        StatusReport {
            pipeline_dir: self.pipeline_dir.clone(),
            dir_exists,
            entries,
            config_path: self.config_path.clone(),
            config_exists,
        }
    }

    fn ensure_directory(&self) -> PiperunResult<()> {
        std::fs::create_dir_all(&self.pipeline_dir).map_err(|e| PiperunError::DirectoryCreate {
            path: self.pipeline_dir.clone(),
            error: e.to_string(),
        })?;
        info!("Pipeline directory ready: {}", self.pipeline_dir.display());
        Ok(())
    }

    fn write_sample_config(&self) -> PiperunResult<()> {
        let write_error = |e: std::io::Error| PiperunError::FileWrite {
            path: self.config_path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let yaml = PipelineConfig::sample().to_yaml()?;
        std::fs::write(&self.config_path, yaml).map_err(write_error)
    }
}

fn list_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}
