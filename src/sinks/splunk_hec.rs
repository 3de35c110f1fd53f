// ABOUTME: Splunk HTTP Event Collector client posting one JSON event per record
// ABOUTME: Success is exactly HTTP 200; optional bounded retry with exponential backoff and in-batch concurrency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use super::{send_in_order, EventSink};
use crate::config::{RetrySettings, SinkConfig};
use crate::constants::splunk;
use crate::errors::DeliveryFailure;
use crate::models::{DeliveryResult, Event, Record};
use crate::utils::http_client::{build_client_with_tls, HttpClientConfig};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Client for a Splunk HTTP Event Collector endpoint
pub struct HecClient {
    client: Client,
    hec_url: String,
    authorization: String,
    index: String,
    host: String,
    source: String,
    retry: RetrySettings,
    concurrency: usize,
}

impl HecClient {
    /// Create a client with default HTTP timeouts
    #[must_use]
    pub fn new(config: &SinkConfig) -> Self {
        Self::with_http_config(config, &HttpClientConfig::default())
    }

    /// Create a client with explicit HTTP timeouts; TLS verification follows `config.verify_ssl`
    #[must_use]
    pub fn with_http_config(config: &SinkConfig, http: &HttpClientConfig) -> Self {
        Self::with_client(config, build_client_with_tls(http, config.verify_ssl))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(config: &SinkConfig, client: Client) -> Self {
        Self {
            client,
            hec_url: config.hec_url.clone(),
            authorization: format!("{} {}", splunk::AUTH_SCHEME, config.hec_token),
            index: config.index.clone(),
            host: config.host.clone(),
            source: config.source.clone(),
            retry: config.retry,
            concurrency: config.delivery_concurrency.max(1),
        }
    }

    /// Target index
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// POST one event, fresh timestamp per call
    async fn post_event(
        &self,
        record: &Record,
        sourcetype: &str,
        source: &str,
    ) -> Result<(), DeliveryFailure> {
        let event = Event::stamped_now(record, &self.host, source, sourcetype, &self.index);

        let response = self
            .client
            .post(&self.hec_url)
            .header("Authorization", &self.authorization)
            .json(&event)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryFailure::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Deliver with the configured retry policy
    async fn deliver(
        &self,
        record: &Record,
        sourcetype: &str,
        source: &str,
    ) -> Result<(), DeliveryFailure> {
        let mut attempt: u32 = 0;
        loop {
            match self.post_event(record, sourcetype, source).await {
                Ok(()) => return Ok(()),
                Err(failure) if failure.is_retryable() && attempt < self.retry.max_retries => {
                    let backoff_ms = backoff_delay_ms(self.retry.base_delay_ms, attempt);
                    attempt += 1;
                    warn!(
                        "HEC delivery failed ({failure}) - retry {attempt}/{} after {backoff_ms}ms backoff",
                        self.retry.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(failure) => return Err(failure),
            }
        }
    }
}

/// Backoff before retry number `attempt + 1`: `base * 2^attempt`, saturating
#[must_use]
pub fn backoff_delay_ms(base_delay_ms: u64, attempt: u32) -> u64 {
    base_delay_ms.saturating_mul(1_u64 << attempt.min(16))
}

#[async_trait]
impl EventSink for HecClient {
    fn default_source(&self) -> &str {
        &self.source
    }

    async fn send_event(&self, record: &Record, sourcetype: &str, source: &str) -> bool {
        match self.deliver(record, sourcetype, source).await {
            Ok(()) => {
                debug!("Delivered {sourcetype} event to HEC");
                true
            }
            Err(DeliveryFailure::Status { status, body }) => {
                error!("Error sending event to Splunk: {status} - {body}");
                false
            }
            Err(failure) => {
                error!("Error sending event to Splunk: {failure}");
                false
            }
        }
    }

    #[instrument(skip_all, fields(sourcetype = %sourcetype, count = records.len()))]
    async fn send_batch(&self, records: &[Record], sourcetype: &str, source: &str) -> DeliveryResult {
        let succeeded = if self.concurrency <= 1 {
            send_in_order(self, records, sourcetype, source).await
        } else {
            let deliveries: Vec<_> = records
                .iter()
                .map(|record| self.send_event(record, sourcetype, source))
                .collect();
            stream::iter(deliveries)
                .buffer_unordered(self.concurrency)
                .filter(|delivered| std::future::ready(*delivered))
                .count()
                .await
        };

        let result = DeliveryResult {
            attempted: records.len(),
            succeeded,
        };
        info!("Sent {result} events to Splunk");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay_ms(500, 0), 500);
        assert_eq!(backoff_delay_ms(500, 1), 1000);
        assert_eq!(backoff_delay_ms(500, 3), 4000);
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay_ms(u64::MAX, 4), u64::MAX);
        assert_eq!(backoff_delay_ms(1, 40), 1 << 16);
    }

    #[test]
    fn test_authorization_header_uses_splunk_scheme() {
        let config = SinkConfig::new("https://hec.example.com/services/collector/event", "tok");
        let client = HecClient::new(&config);
        assert_eq!(client.authorization, "Splunk tok");
        assert_eq!(client.index(), "oura_data");
        assert_eq!(client.default_source(), "oura_api");
    }
}
