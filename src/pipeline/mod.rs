// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Pipeline definitions and orchestration
//!
//! This module loads the pipeline config and drives the `run`, `init` and
//! `status` actions over it.

mod definition;
mod director;

pub use definition::*;
pub use director::{Outcome, PipelineDirector, RunReport, StatusReport};
