// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Utility modules
//!
//! Common utilities for the piperun CLI.

pub mod colors;

pub use colors::*;
