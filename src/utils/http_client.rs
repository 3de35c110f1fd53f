// ABOUTME: HTTP client construction with configurable timeouts for the Oura and HEC clients
// ABOUTME: Each client owns its reqwest::Client; the HEC client may disable certificate checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use crate::constants::defaults;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Timeouts applied to every outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    fn builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
    }
}

/// Create a client with the configured timeouts
///
/// Falls back to `Client::new()` if the builder fails
#[must_use]
pub fn build_client(config: &HttpClientConfig) -> Client {
    create_custom_client(config, |builder| builder)
}

/// Create a client whose TLS certificate verification can be turned off
///
/// Used for collectors with self-signed certificates. The flag applies to the
/// whole client, never per request.
#[must_use]
pub fn build_client_with_tls(config: &HttpClientConfig, verify_certificates: bool) -> Client {
    if verify_certificates {
        return build_client(config);
    }

    warn!("Building HTTP client with certificate verification disabled");
    create_custom_client(config, |builder| builder.danger_accept_invalid_certs(true))
}

/// Create a client with configured timeouts plus extra builder settings
#[must_use]
pub fn create_custom_client<F>(config: &HttpClientConfig, config_fn: F) -> Client
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    config_fn(config.builder()).build().unwrap_or_else(|e| {
        warn!("Failed to build configured HTTP client, using defaults: {e}");
        Client::new()
    })
}
