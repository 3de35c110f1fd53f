// ABOUTME: Shared fixtures for integration tests: windows, configs pointed at mock servers, sample records
// ABOUTME: Included by each test crate with `mod common;`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code, missing_docs)]

use chrono::NaiveDate;
use oura_splunk_sync::config::{SinkConfig, SourceConfig};
use oura_splunk_sync::models::{FetchWindow, Record};
use oura_splunk_sync::utils::http_client::HttpClientConfig;
use serde_json::{json, Value};

pub const OURA_TOKEN: &str = "test-oura-token";
pub const HEC_TOKEN: &str = "test-hec-token";
pub const HEC_PATH: &str = "/services/collector/event";

/// Window used by most tests: 2024-06-08 ..= 2024-06-15
pub fn test_window() -> FetchWindow {
    FetchWindow::ending_on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), 7)
}

pub fn source_config(base_url: &str) -> SourceConfig {
    SourceConfig::new(OURA_TOKEN).with_base_url(base_url)
}

pub fn sink_config(server_uri: &str) -> SinkConfig {
    SinkConfig::new(format!("{server_uri}{HEC_PATH}"), HEC_TOKEN)
}

/// Short timeouts so transport-failure tests finish quickly
pub fn fast_http() -> HttpClientConfig {
    HttpClientConfig {
        timeout_secs: 2,
        connect_timeout_secs: 1,
    }
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record fixture must be a JSON object")
}

/// `n` records of the form `{"n": i}`
pub fn numbered_records(n: usize) -> Vec<Record> {
    (0..n).map(|i| record(json!({ "n": i }))).collect()
}

/// Oura collection envelope with the given records and no next page
pub fn oura_page(data: Value) -> Value {
    json!({ "data": data, "next_token": null })
}
