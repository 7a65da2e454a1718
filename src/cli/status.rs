// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Status command - report what exists on disk

use crate::executors::Executor;
use crate::pipeline::{Outcome, PipelineDirector};
use crate::utils::{print_bullet, print_header, print_success, print_warning};

/// Run the status command. Absence is reported, never an error.
pub fn run<E: Executor>(director: &PipelineDirector<E>) -> Outcome {
    let report = director.status();

    print_header("Pipeline status");

    if report.dir_exists {
        print_success(&format!(
            "Directory {} ({} entr{})",
            report.pipeline_dir.display(),
            report.entries.len(),
            if report.entries.len() == 1 { "y" } else { "ies" }
        ));
        for name in &report.entries {
            print_bullet(name);
        }
    } else {
        print_warning(&format!("Directory {} does not exist", report.pipeline_dir.display()));
    }

    if report.config_exists {
        print_success(&format!("Config {}", report.config_path.display()));
    } else {
        print_warning(&format!("Config {} does not exist", report.config_path.display()));
    }

    Outcome::Succeeded
}
