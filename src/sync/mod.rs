// ABOUTME: Sync orchestration: one pass over the configured resource kinds from source to sink
// ABOUTME: Exposes the pipeline type plus the top-level run entry points used by the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

/// Fetch-then-deliver pipeline
pub mod pipeline;

pub use pipeline::{run, run_guarded, SyncPipeline};
