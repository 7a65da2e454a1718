// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! # piperun - Sequential Pipeline Runner
//!
//! `piperun` reads a YAML config listing shell commands (or named steps
//! wrapping a command) and runs them one after another in a working
//! directory, stopping at the first command that exits non-zero.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the working directory and a sample config
//! piperun init --pipeline-config pipeline.yaml --pipeline-dir work
//!
//! # Run it
//! piperun run --pipeline-config pipeline.yaml --pipeline-dir work
//!
//! # See what exists
//! piperun status --pipeline-config pipeline.yaml --pipeline-dir work
//! ```
//!
//! ## Config
//!
//! ```yaml
//! name: "build"
//! steps:
//!   - name: "Compile"
//!     command: "make"
//!   - name: "Test"
//!     command: "make test 2>&1 | tee test.log"
//! ```
//!
//! A flat `commands:` list of strings is accepted too; `steps` wins when
//! both are present. With neither, a short sample sequence runs.

pub mod cli;
pub mod errors;
pub mod executors;
pub mod logging;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use errors::{PiperunError, PiperunResult};
pub use executors::{CommandExecutor, ExecutionResult, Executor, Runner};
pub use pipeline::{Outcome, PipelineConfig, PipelineDirector, StepSource, StepSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
