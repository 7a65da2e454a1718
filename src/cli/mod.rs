// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! CLI definition and dispatch
//!
//! Defines the command-line interface for piperun.

pub mod init;
pub mod run;
pub mod status;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::executors::{Runner, DEFAULT_RUNNER};
use crate::pipeline::{Outcome, PipelineDirector};

/// Sequential pipeline runner
///
/// Runs the shell commands declared in a YAML pipeline config, one after
/// another, stopping at the first failure.
#[derive(Parser, Debug)]
#[clap(
    name = "piperun",
    version,
    about = "Run the commands of a YAML pipeline config in order",
    long_about = None,
    after_help = "Examples:\n\
        piperun init --pipeline-config pipeline.yaml --pipeline-dir work\n\
        piperun run --pipeline-config pipeline.yaml --pipeline-dir work\n\
        piperun status --pipeline-config pipeline.yaml --pipeline-dir work\n\
        piperun run --pipeline-config tools.yaml --pipeline-dir . --runner python3"
)]
pub struct Cli {
    /// Action to perform
    #[clap(value_enum)]
    pub action: Action,

    /// Path to pipeline configuration YAML file
    #[clap(long, env = "PIPERUN_CONFIG", value_name = "PATH")]
    pub pipeline_config: PathBuf,

    /// Directory for pipeline execution
    #[clap(long, env = "PIPERUN_DIR", value_name = "PATH")]
    pub pipeline_dir: PathBuf,

    /// Command runner; anything other than bash gets whitespace-split arguments
    #[clap(long, default_value = DEFAULT_RUNNER, env = "PIPERUN_RUNNER", value_name = "NAME")]
    pub runner: String,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

/// Action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Execute the pipeline
    Run,
    /// Create the pipeline directory and a sample config
    Init,
    /// Report whether the directory and config exist
    Status,
}

/// Run the selected action; `status` always succeeds
pub async fn dispatch(cli: Cli) -> Outcome {
    debug!("{:?}", cli);

    let runner = Runner::from_name(&cli.runner);
    let director = PipelineDirector::new(cli.pipeline_config, cli.pipeline_dir, runner);

    match cli.action {
        Action::Run => run::run(&director).await,
        Action::Init => init::run(&director, cli.verbose),
        Action::Status => status::run(&director),
    }
}
