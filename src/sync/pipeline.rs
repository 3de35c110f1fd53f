// ABOUTME: Sync pipeline orchestrating Oura fetches and HEC delivery for one run
// ABOUTME: Fetch errors abort the run immediately; delivery failures are counted and the run continues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! # Sync Pipeline
//!
//! A run computes the fetch window once, then for each resource kind in order:
//!
//! 1. fetches the kind's records; a failure aborts the run and later kinds are
//!    never fetched,
//! 2. skips delivery when nothing came back,
//! 3. otherwise sends every record through the sink and records the
//!    `DeliveryResult`.
//!
//! Kinds finished before an abort stay delivered; there is no rollback.

use crate::config::SyncConfig;
use crate::constants::defaults;
use crate::errors::{SyncError, SyncResult};
use crate::logging::log_delivery;
use crate::models::{FetchWindow, KindOutcome, ResourceKind, SyncReport};
use crate::providers::{HealthDataSource, OuraClient};
use crate::sinks::{EventSink, HecClient};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info, instrument, warn};

/// One-shot pipeline from a health data source to an event sink
pub struct SyncPipeline {
    source: Box<dyn HealthDataSource>,
    sink: Box<dyn EventSink>,
    resources: Vec<ResourceKind>,
    days_to_fetch: u32,
}

impl SyncPipeline {
    /// Pipeline over the default resource order and window size
    #[must_use]
    pub fn new(source: Box<dyn HealthDataSource>, sink: Box<dyn EventSink>) -> Self {
        Self {
            source,
            sink,
            resources: ResourceKind::DEFAULT_ORDER.to_vec(),
            days_to_fetch: defaults::DAYS_TO_FETCH,
        }
    }

    /// Validate `config` and build the Oura and HEC clients from it
    ///
    /// # Errors
    ///
    /// Returns a configuration error when validation fails; no client is built
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        config.validate()?;

        let source = OuraClient::with_http_config(&config.oura, &config.http);
        let sink = HecClient::with_http_config(&config.splunk, &config.http);

        Ok(Self::new(Box::new(source), Box::new(sink))
            .with_resources(config.resources.clone())
            .with_days_to_fetch(config.days_to_fetch))
    }

    /// Override the resource kinds processed, in order
    #[must_use]
    pub fn with_resources(mut self, resources: Vec<ResourceKind>) -> Self {
        self.resources = resources;
        self
    }

    /// Override the window size
    #[must_use]
    pub fn with_days_to_fetch(mut self, days: u32) -> Self {
        self.days_to_fetch = days;
        self
    }

    /// Resource kinds processed, in order
    #[must_use]
    pub fn resources(&self) -> &[ResourceKind] {
        &self.resources
    }

    /// Run once with the window ending on the local date
    ///
    /// # Errors
    ///
    /// Returns the first source request error; later kinds are not fetched
    pub async fn run(&self) -> SyncResult<SyncReport> {
        self.run_window(FetchWindow::ending_today(self.days_to_fetch))
            .await
    }

    /// [`SyncPipeline::run`] on a spawned task; a panic becomes `SyncError::Unexpected`
    ///
    /// # Errors
    ///
    /// The first source request error, or `Unexpected` when the task panics
    pub async fn run_guarded(self: Arc<Self>) -> SyncResult<SyncReport> {
        joined(tokio::spawn(async move { self.run().await }).await)
    }

    /// Run once over an explicit window
    ///
    /// # Errors
    ///
    /// Returns the first source request error; later kinds are not fetched
    #[instrument(skip_all, fields(start = %window.start, end = %window.end))]
    pub async fn run_window(&self, window: FetchWindow) -> SyncResult<SyncReport> {
        info!("Fetching {} data from {window}", self.source.name());

        let mut outcomes: Vec<KindOutcome> = Vec::with_capacity(self.resources.len());

        for &kind in &self.resources {
            let records = match self.source.fetch(kind, &window).await {
                Ok(records) => records,
                Err(e) => {
                    let completed: Vec<&str> = outcomes.iter().map(|o| o.kind.as_str()).collect();
                    error!(
                        "Error during data sync: {e} (completed before abort: [{}])",
                        completed.join(", ")
                    );
                    return Err(e);
                }
            };

            let delivery = if records.is_empty() {
                info!("No {kind} records in window");
                None
            } else if let Some(sourcetype) = kind.sourcetype() {
                info!("Sending {} {kind} records to Splunk...", records.len());
                Some(
                    self.sink
                        .send_batch(&records, sourcetype, self.sink.default_source())
                        .await,
                )
            } else {
                warn!(
                    "Fetched {} {kind} records; {kind} has no sourcetype and is not forwarded",
                    records.len()
                );
                None
            };

            log_delivery(kind, records.len(), delivery);
            outcomes.push(KindOutcome {
                kind,
                fetched: records.len(),
                delivery,
            });
        }

        let report = SyncReport { window, outcomes };
        info!(
            "Data sync completed successfully! fetched={} delivered={}",
            report.total_fetched(),
            report.total_delivery()
        );
        Ok(report)
    }
}

/// Validate `config`, build the clients and run once
///
/// Configuration errors are returned before any network I/O.
///
/// # Errors
///
/// Configuration errors or the first source request error
pub async fn run(config: &SyncConfig) -> SyncResult<SyncReport> {
    SyncPipeline::from_config(config)?.run().await
}

/// [`run`] on a separate task so a panic surfaces as `SyncError::Unexpected`
///
/// # Errors
///
/// Same as [`run`], plus `Unexpected` when the run task panics or is cancelled
pub async fn run_guarded(config: &SyncConfig) -> SyncResult<SyncReport> {
    Arc::new(SyncPipeline::from_config(config)?)
        .run_guarded()
        .await
}

/// Map a finished run task to its result
fn joined(outcome: Result<SyncResult<SyncReport>, JoinError>) -> SyncResult<SyncReport> {
    outcome.unwrap_or_else(|join_error| {
        error!("Unexpected error: {join_error}");
        Err(SyncError::unexpected(join_error.to_string()))
    })
}
