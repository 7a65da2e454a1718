// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! piperun - Sequential Pipeline Runner
//!
//! Runs the commands of a YAML pipeline config in order.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::instrument::WithSubscriber;

use piperun::cli::{dispatch, Cli};
use piperun::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, scoped to this invocation
    let subscriber = logging::subscriber(
        logging::env_filter(cli.verbose),
        std::io::stderr,
        std::io::stderr().is_terminal(),
    );

    let outcome = dispatch(cli).with_subscriber(subscriber).await;

    ExitCode::from(outcome.exit_code())
}
