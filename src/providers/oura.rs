// ABOUTME: Oura v2 API client fetching windowed records for sleep, activity, readiness, heart rate, workouts
// ABOUTME: Bearer-token GET per resource endpoint, follows next_token pages, returns raw `data` records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use super::HealthDataSource;
use crate::config::SourceConfig;
use crate::constants::oura;
use crate::errors::{SyncError, SyncResult};
use crate::models::{FetchWindow, Record, ResourceKind};
use crate::utils::http_client::{build_client, HttpClientConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

/// Envelope shared by every user collection endpoint
#[derive(Debug, Deserialize)]
struct OuraCollectionResponse {
    /// Records; absent or `null` means none
    #[serde(default)]
    data: Option<Vec<Record>>,
    /// Cursor for the next page, `null` on the last page
    #[serde(default)]
    next_token: Option<String>,
}

/// Client for the Oura v2 user collection API
pub struct OuraClient {
    client: Client,
    base_url: String,
    authorization: String,
    max_pages: u32,
}

impl OuraClient {
    /// Create a client with default HTTP timeouts
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self::with_http_config(config, &HttpClientConfig::default())
    }

    /// Create a client with explicit HTTP timeouts
    #[must_use]
    pub fn with_http_config(config: &SourceConfig, http: &HttpClientConfig) -> Self {
        Self::with_client(config, build_client(http))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(config: &SourceConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            authorization: format!("Bearer {}", config.api_token),
            max_pages: config.max_pages.max(1),
        }
    }

    /// Full URL of the endpoint serving `kind`
    #[must_use]
    pub fn endpoint_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }

    /// Request one page and decode the envelope
    async fn fetch_page(
        &self,
        kind: ResourceKind,
        window: &FetchWindow,
        next_token: Option<&str>,
    ) -> SyncResult<OuraCollectionResponse> {
        let url = self.endpoint_url(kind);
        let mut request = self
            .client
            .get(&url)
            .header("Authorization", &self.authorization)
            .query(&window.query_params(kind));
        if let Some(token) = next_token {
            request = request.query(&[(oura::NEXT_TOKEN_PARAM, token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| SyncError::SourceTransport { kind, source })?;

        let status = response.status();
        debug!("Oura API response status for {kind}: {status}");

        let body = response
            .text()
            .await
            .map_err(|source| SyncError::SourceTransport { kind, source })?;

        if !status.is_success() {
            error!(
                "Oura API request for {kind} failed - status: {status}, body_length: {} bytes",
                body.len()
            );
            return Err(SyncError::SourceStatus {
                kind,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SyncError::SourceDecode {
            kind,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HealthDataSource for OuraClient {
    fn name(&self) -> &'static str {
        "oura"
    }

    #[instrument(skip_all, fields(kind = %kind, start = %window.start, end = %window.end))]
    async fn fetch(&self, kind: ResourceKind, window: &FetchWindow) -> SyncResult<Vec<Record>> {
        info!("Fetching {kind} data from {}", self.endpoint_url(kind));

        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.fetch_page(kind, window, next_token.as_deref()).await?;
            pages += 1;
            records.extend(page.data.unwrap_or_default());

            next_token = page.next_token.filter(|t| !t.is_empty());
            if next_token.is_none() {
                break;
            }
            if pages >= self.max_pages {
                warn!(
                    "Stopping {kind} pagination after {pages} pages; remaining records are not fetched"
                );
                break;
            }
        }

        info!("Fetched {} {kind} records in {pages} page(s)", records.len());
        Ok(records)
    }
}
