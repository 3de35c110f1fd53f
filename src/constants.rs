// ABOUTME: Constants for the Oura to Splunk HEC sync: endpoints, labels, env keys and defaults
// ABOUTME: Grouped into domain modules so call sites read as `oura::BASE_URL`, `env_keys::SPLUNK_INDEX`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! # Constants Module
//!
//! Fixed values shared by the source client, the sink client and configuration
//! loading. Nothing here reads the environment; see `config::environment`.

/// Oura v2 API constants
pub mod oura {
    /// Default base URL of the user collection endpoints
    pub const BASE_URL: &str = "https://api.ouraring.com/v2/usercollection";

    /// Endpoint path for sleep periods
    pub const SLEEP_ENDPOINT: &str = "sleep";
    /// Endpoint path for daily activity summaries
    pub const DAILY_ACTIVITY_ENDPOINT: &str = "daily_activity";
    /// Endpoint path for daily readiness summaries
    pub const DAILY_READINESS_ENDPOINT: &str = "daily_readiness";
    /// Endpoint path for heart-rate samples
    pub const HEART_RATE_ENDPOINT: &str = "heartrate";
    /// Endpoint path for workouts
    pub const WORKOUT_ENDPOINT: &str = "workout";

    /// Query parameter carrying the pagination cursor
    pub const NEXT_TOKEN_PARAM: &str = "next_token";

    /// Upper bound on pages followed for a single fetch
    pub const DEFAULT_MAX_PAGES: u32 = 100;
}

/// Splunk HTTP Event Collector constants
pub mod splunk {
    /// Authorization scheme used by HEC (`Authorization: Splunk <token>`)
    pub const AUTH_SCHEME: &str = "Splunk";

    /// Default target index
    pub const DEFAULT_INDEX: &str = "oura_data";

    /// Host label stamped on every event
    pub const DEFAULT_HOST: &str = "oura-integration";

    /// Source label stamped on every event
    pub const DEFAULT_SOURCE: &str = "oura_api";

    /// Sourcetype labels per resource kind
    pub mod sourcetypes {
        /// Sleep periods
        pub const SLEEP: &str = "oura:sleep";
        /// Daily activity
        pub const ACTIVITY: &str = "oura:activity";
        /// Daily readiness
        pub const READINESS: &str = "oura:readiness";
        /// Workouts
        pub const WORKOUT: &str = "oura:workout";
    }
}

/// Sync run defaults
pub mod defaults {
    /// Days covered by the rolling fetch window
    pub const DAYS_TO_FETCH: u32 = 7;

    /// Sink retries per event (0 = deliver once, never retry)
    pub const MAX_RETRIES: u32 = 0;

    /// Initial sink retry backoff
    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Events in flight per batch (1 = strictly sequential)
    pub const DELIVERY_CONCURRENCY: usize = 1;

    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;

    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names read by `SyncConfig::from_env`
pub mod env_keys {
    /// Oura personal access token (required)
    pub const OURA_API_TOKEN: &str = "OURA_API_TOKEN";
    /// Oura base URL override
    pub const OURA_BASE_URL: &str = "OURA_BASE_URL";
    /// Pagination bound per fetch
    pub const OURA_MAX_PAGES: &str = "OURA_MAX_PAGES";
    /// Comma-separated resource kinds to sync
    pub const OURA_RESOURCES: &str = "OURA_RESOURCES";

    /// HEC collector URL (required)
    pub const SPLUNK_HEC_URL: &str = "SPLUNK_HEC_URL";
    /// HEC token (required)
    pub const SPLUNK_HEC_TOKEN: &str = "SPLUNK_HEC_TOKEN";
    /// Target index
    pub const SPLUNK_INDEX: &str = "SPLUNK_INDEX";
    /// TLS certificate verification flag
    pub const SPLUNK_VERIFY_SSL: &str = "SPLUNK_VERIFY_SSL";
    /// Event host label
    pub const SPLUNK_HOST: &str = "SPLUNK_HOST";
    /// Event source label
    pub const SPLUNK_SOURCE: &str = "SPLUNK_SOURCE";
    /// Sink retry bound
    pub const SPLUNK_MAX_RETRIES: &str = "SPLUNK_MAX_RETRIES";
    /// Sink retry initial backoff
    pub const SPLUNK_RETRY_BASE_DELAY_MS: &str = "SPLUNK_RETRY_BASE_DELAY_MS";
    /// Events in flight per batch
    pub const SPLUNK_DELIVERY_CONCURRENCY: &str = "SPLUNK_DELIVERY_CONCURRENCY";

    /// Window size in days
    pub const DAYS_TO_FETCH: &str = "DAYS_TO_FETCH";
    /// HTTP request timeout
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
    /// HTTP connect timeout
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
}

/// Service identity used in logs
pub mod service_names {
    /// Binary / service name
    pub const OURA_SPLUNK_SYNC: &str = "oura-splunk-sync";
}
