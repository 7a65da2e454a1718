// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Run command - execute the pipeline

use crate::executors::Executor;
use crate::pipeline::{Outcome, PipelineDirector};
use crate::utils::{print_error, print_success};

/// Run the pipeline and print a one-line summary
pub async fn run<E: Executor>(director: &PipelineDirector<E>) -> Outcome {
    let report = director.run().await;

    match (report.outcome, report.failed_at) {
        (Outcome::Succeeded, _) => print_success(&format!(
            "Pipeline completed: {} command{} run, {} skipped ({:.2}s)",
            report.executed,
            if report.executed == 1 { "" } else { "s" },
            report.skipped,
            report.duration.as_secs_f64()
        )),
        (Outcome::Failed, Some(index)) => {
            print_error(&format!("Pipeline failed at item {}", index))
        }
        (Outcome::Failed, None) => print_error("Pipeline failed before running any command"),
    }

    report.outcome
}
