// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Init command - create the pipeline directory and a sample config

use colored::Colorize;

use crate::executors::Executor;
use crate::pipeline::{Outcome, PipelineConfig, PipelineDirector};
use crate::utils::{code, print_error, print_success};

/// Run the init command
pub fn run<E: Executor>(director: &PipelineDirector<E>, verbose: bool) -> Outcome {
    let existed = director.config_path().exists();
    let outcome = director.init();

    if !outcome.is_success() {
        print_error("Pipeline initialization failed");
        return outcome;
    }

    print_success(&format!("Pipeline directory {}", director.pipeline_dir().display()));
    if existed {
        print_success(&format!(
            "Kept existing config {}",
            director.config_path().display()
        ));
    } else {
        print_success(&format!("Created {}", director.config_path().display()));
    }

    println!();
    println!(
        "Next: run {} to execute it",
        code(&format!(
            "piperun run --pipeline-config {} --pipeline-dir {}",
            director.config_path().display(),
            director.pipeline_dir().display()
        ))
    );

    if verbose && !existed {
        if let Ok(yaml) = PipelineConfig::sample().to_yaml() {
            println!();
            println!("{}", "Generated config:".dimmed());
            println!("{}", "─".repeat(50).dimmed());
            println!("{}", yaml.dimmed());
        }
    }

    outcome
}
