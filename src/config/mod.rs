// ABOUTME: Configuration module for the Oura to Splunk HEC sync
// ABOUTME: Immutable source/sink settings built once at startup and passed into the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! Configuration management.
//!
//! Environment lookups happen only in [`environment::SyncConfig::from_env`];
//! everything downstream receives the resulting structs by reference.

/// Environment-based configuration loading and validation
pub mod environment;

pub use environment::{RetrySettings, SinkConfig, SourceConfig, SyncConfig};
