// ABOUTME: End-to-end tests of the sync pipeline with mocked Oura and HEC servers
// ABOUTME: Covers per-kind order, fetch-abort semantics, empty kinds, config errors and fetch-only kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use common::{numbered_records, oura_page, sink_config, source_config, test_window, HEC_PATH};
use oura_splunk_sync::config::{SinkConfig, SourceConfig, SyncConfig};
use oura_splunk_sync::errors::{ErrorCode, SyncError, SyncResult};
use oura_splunk_sync::models::{FetchWindow, Record, ResourceKind};
use oura_splunk_sync::providers::{HealthDataSource, OuraClient};
use oura_splunk_sync::sinks::{EventSink, HecClient};
use oura_splunk_sync::sync::{self, SyncPipeline};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(oura: &MockServer, hec: &MockServer) -> SyncPipeline {
    SyncPipeline::new(
        Box::new(OuraClient::new(&source_config(&oura.uri()))),
        Box::new(HecClient::new(&sink_config(&hec.uri()))),
    )
}

async fn mount_collection(server: &MockServer, endpoint: &str, data: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(oura_page(data)))
        .mount(server)
        .await;
}

async fn accepting_collector() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HEC_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_single_sleep_record_reaches_collector() {
    let oura = MockServer::start().await;
    let hec = accepting_collector().await;
    mount_collection(&oura, "/sleep", json!([{"score": 80}])).await;
    for endpoint in ["/daily_activity", "/daily_readiness", "/workout"] {
        mount_collection(&oura, endpoint, json!([])).await;
    }

    let report = pipeline(&oura, &hec).run_window(test_window()).await.unwrap();

    let requests = hec.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let event: Value = requests[0].body_json().unwrap();
    assert_eq!(event["sourcetype"], json!("oura:sleep"));
    assert_eq!(event["index"], json!("oura_data"));
    assert_eq!(event["event"], json!({"score": 80}));

    let sleep = report.outcome(ResourceKind::Sleep).unwrap();
    assert_eq!(sleep.fetched, 1);
    assert_eq!(sleep.delivery.unwrap().succeeded, 1);
    for kind in [
        ResourceKind::Activity,
        ResourceKind::Readiness,
        ResourceKind::Workout,
    ] {
        let outcome = report.outcome(kind).unwrap();
        assert_eq!(outcome.fetched, 0);
        assert!(outcome.delivery.is_none());
    }
}

#[tokio::test]
async fn test_fetch_failure_aborts_remaining_kinds() {
    let oura = MockServer::start().await;
    let hec = accepting_collector().await;
    mount_collection(&oura, "/sleep", json!([{"id": 1}, {"id": 2}])).await;
    Mock::given(method("GET"))
        .and(path("/daily_activity"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&oura)
        .await;
    for endpoint in ["/daily_readiness", "/workout"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(oura_page(json!([]))))
            .expect(0)
            .mount(&oura)
            .await;
    }

    let err = pipeline(&oura, &hec)
        .run_window(test_window())
        .await
        .unwrap_err();

    assert_eq!(err.resource_kind(), Some(ResourceKind::Activity));
    assert_eq!(err.code(), ErrorCode::ExternalServiceError);

    // sleep was delivered before the abort and stays delivered
    let requests = hec.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let event: Value = request.body_json().unwrap();
        assert_eq!(event["sourcetype"], json!("oura:sleep"));
    }
}

#[tokio::test]
async fn test_delivery_failures_do_not_abort_the_run() {
    let oura = MockServer::start().await;
    let hec = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HEC_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&hec)
        .await;
    mount_collection(&oura, "/sleep", json!([{"id": 1}])).await;
    mount_collection(&oura, "/daily_activity", json!([{"id": 2}, {"id": 3}])).await;
    mount_collection(&oura, "/daily_readiness", json!([])).await;
    mount_collection(&oura, "/workout", json!([{"id": 4}])).await;

    let report = pipeline(&oura, &hec).run_window(test_window()).await.unwrap();

    let total = report.total_delivery();
    assert_eq!(total.attempted, 4);
    assert_eq!(total.succeeded, 0);
    assert_eq!(report.total_fetched(), 4);
}

#[tokio::test]
async fn test_missing_configuration_fails_before_any_request() {
    let oura = MockServer::start().await;
    let hec = MockServer::start().await;

    let config = SyncConfig::new(
        SourceConfig::new("").with_base_url(oura.uri()),
        SinkConfig::new(format!("{}{HEC_PATH}", hec.uri()), ""),
    );
    let err = sync::run(&config).await.unwrap_err();

    assert!(err.is_configuration());
    match &err {
        SyncError::MissingSettings { keys } => {
            assert_eq!(keys, &vec!["OURA_API_TOKEN", "SPLUNK_HEC_TOKEN"]);
        }
        other => panic!("expected MissingSettings, got {other:?}"),
    }
    assert!(oura.received_requests().await.unwrap().is_empty());
    assert!(hec.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_guarded_run_syncs_configured_resources() {
    let oura = MockServer::start().await;
    let hec = accepting_collector().await;
    mount_collection(&oura, "/workout", json!([{"activity": "cycling"}])).await;

    let mut config = SyncConfig::new(source_config(&oura.uri()), sink_config(&hec.uri()));
    config.resources = vec![ResourceKind::Workout];

    let report = sync::run_guarded(&config).await.unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcome(ResourceKind::Workout).unwrap().fetched, 1);
    assert_eq!(oura.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_heart_rate_is_fetched_but_not_forwarded() {
    let oura = MockServer::start().await;
    let hec = accepting_collector().await;
    mount_collection(&oura, "/heartrate", json!([{"bpm": 61}, {"bpm": 64}])).await;

    let report = pipeline(&oura, &hec)
        .with_resources(vec![ResourceKind::HeartRate])
        .run_window(test_window())
        .await
        .unwrap();

    let outcome = report.outcome(ResourceKind::HeartRate).unwrap();
    assert_eq!(outcome.fetched, 2);
    assert!(outcome.delivery.is_none());
    assert!(hec.received_requests().await.unwrap().is_empty());
}

/// Source returning canned records and logging the kinds it was asked for
struct ScriptedSource {
    calls: Arc<Mutex<Vec<ResourceKind>>>,
    per_kind: usize,
}

#[async_trait]
impl HealthDataSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, kind: ResourceKind, _window: &FetchWindow) -> SyncResult<Vec<Record>> {
        self.calls.lock().unwrap().push(kind);
        Ok(numbered_records(self.per_kind))
    }
}

/// Sink remembering each sourcetype it received; rejects every other event
struct RecordingSink {
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    fn default_source(&self) -> &str {
        "recording"
    }

    async fn send_event(&self, record: &Record, sourcetype: &str, _source: &str) -> bool {
        self.sent.lock().unwrap().push(sourcetype.to_owned());
        record["n"].as_u64().is_some_and(|n| n % 2 == 0)
    }
}

#[tokio::test]
async fn test_kinds_are_processed_in_default_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sent = Arc::new(Mutex::new(Vec::new()));
    let pipeline = SyncPipeline::new(
        Box::new(ScriptedSource {
            calls: Arc::clone(&calls),
            per_kind: 3,
        }),
        Box::new(RecordingSink {
            sent: Arc::clone(&sent),
        }),
    );

    let report = pipeline.run_window(test_window()).await.unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        ResourceKind::DEFAULT_ORDER.to_vec()
    );
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 12);
    assert_eq!(&sent[..3], ["oura:sleep", "oura:sleep", "oura:sleep"]);
    assert_eq!(sent[11], "oura:workout");

    for outcome in &report.outcomes {
        let delivery = outcome.delivery.unwrap();
        assert_eq!(delivery.attempted, 3);
        assert_eq!(delivery.succeeded, 2);
    }
    assert_eq!(report.window, test_window());
}

/// Source whose fetch panics mid-run
struct PanickingSource;

#[async_trait]
impl HealthDataSource for PanickingSource {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn fetch(&self, kind: ResourceKind, _window: &FetchWindow) -> SyncResult<Vec<Record>> {
        panic!("source failed unexpectedly while fetching {kind}");
    }
}

#[tokio::test]
async fn test_guarded_run_turns_panic_into_unexpected_error() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let pipeline = Arc::new(SyncPipeline::new(
        Box::new(PanickingSource),
        Box::new(RecordingSink {
            sent: Arc::clone(&sent),
        }),
    ));

    let err = pipeline.run_guarded().await.unwrap_err();

    assert!(matches!(err, SyncError::Unexpected(_)));
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.code().exit_code(), 70);
    assert!(sent.lock().unwrap().is_empty());
}
