// ABOUTME: Event sink abstraction and the Splunk HTTP Event Collector client implementing it
// ABOUTME: Delivery is per event; failures are soft and only reduce the batch's success count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use crate::models::{DeliveryResult, Record};
use async_trait::async_trait;
use tracing::info;

/// Splunk HEC client
pub mod splunk_hec;

pub use splunk_hec::HecClient;

/// Destination for wrapped records
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Source label applied when the caller has no better one
    fn default_source(&self) -> &str;

    /// Deliver one record as an event; `true` iff the sink accepted it
    async fn send_event(&self, record: &Record, sourcetype: &str, source: &str) -> bool;

    /// Deliver every record in order, never stopping early
    async fn send_batch(&self, records: &[Record], sourcetype: &str, source: &str) -> DeliveryResult {
        let result = DeliveryResult {
            attempted: records.len(),
            succeeded: send_in_order(self, records, sourcetype, source).await,
        };
        info!("Sent {result} {sourcetype} events");
        result
    }
}

/// Send `records` one at a time in order; returns how many the sink accepted
pub async fn send_in_order<S>(sink: &S, records: &[Record], sourcetype: &str, source: &str) -> usize
where
    S: EventSink + ?Sized,
{
    let mut succeeded = 0;
    for record in records {
        if sink.send_event(record, sourcetype, source).await {
            succeeded += 1;
        }
    }
    succeeded
}
