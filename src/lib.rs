// ABOUTME: Library entry point for the Oura Ring to Splunk HEC sync
// ABOUTME: Fetches windowed health records from the Oura v2 API and forwards them as HEC events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

#![deny(unsafe_code)]

//! # Oura Splunk Sync
//!
//! Synchronizes personal health records from the Oura v2 REST API into a
//! Splunk HTTP Event Collector.
//!
//! ## Flow
//!
//! For each resource kind (sleep, activity, readiness, workout by default) a
//! run fetches every record inside a rolling date window, wraps each record in
//! a HEC event and posts it to the collector. Fetch failures stop the run;
//! rejected events are counted and the run carries on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oura_splunk_sync::config::SyncConfig;
//! use oura_splunk_sync::sync;
//!
//! # async fn example() -> oura_splunk_sync::errors::SyncResult<()> {
//! let config = SyncConfig::from_env()?;
//! let report = sync::run(&config).await?;
//! println!("delivered {}", report.total_delivery());
//! # Ok(())
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// Endpoints, labels, environment keys and defaults
pub mod constants;

/// Error types and result aliases
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Resource kinds, fetch window, events and delivery results
pub mod models;

/// Health data sources (Oura)
pub mod providers;

/// Event sinks (Splunk HEC)
pub mod sinks;

/// Sync orchestration
pub mod sync;

/// Shared utilities
pub mod utils;
