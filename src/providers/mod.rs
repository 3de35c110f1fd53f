// ABOUTME: Health data source abstraction and the Oura v2 API client implementing it
// ABOUTME: The pipeline depends on the trait so tests can substitute an in-memory source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use crate::errors::SyncResult;
use crate::models::{FetchWindow, Record, ResourceKind};
use async_trait::async_trait;

/// Oura v2 user collection client
pub mod oura;

pub use oura::OuraClient;

/// A source of raw health records for one resource kind at a time
#[async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetch every record of `kind` inside `window`
    ///
    /// # Errors
    ///
    /// Returns a source request error (`SourceStatus`, `SourceTransport`,
    /// `SourceDecode`) when the records cannot be retrieved. Never retries.
    async fn fetch(&self, kind: ResourceKind, window: &FetchWindow) -> SyncResult<Vec<Record>>;
}
