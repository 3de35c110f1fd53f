// ABOUTME: Environment configuration for the sync: Oura source settings, Splunk HEC sink settings, run options
// ABOUTME: Parses environment variables (and .env) once into immutable structs, with validation and redacted summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! Environment-based configuration

use crate::constants::{defaults, env_keys, oura, splunk};
use crate::errors::{SyncError, SyncResult};
use crate::models::ResourceKind;
use crate::utils::http_client::HttpClientConfig;
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// Oura API settings
#[derive(Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Personal access token sent as `Authorization: Bearer <token>`
    pub api_token: String,
    /// Base URL of the user collection endpoints
    pub base_url: String,
    /// Upper bound on pages followed per fetch
    pub max_pages: u32,
}

impl SourceConfig {
    /// Settings with the default base URL and paging bound
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: oura::BASE_URL.to_owned(),
            max_pages: oura::DEFAULT_MAX_PAGES,
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_token", &redact(&self.api_token))
            .field("base_url", &self.base_url)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// Sink retry policy. `max_retries == 0` delivers each event exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Additional attempts after the first failed one
    pub max_retries: u32,
    /// Backoff before the first retry, doubled for each further retry
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            base_delay_ms: defaults::RETRY_BASE_DELAY_MS,
        }
    }
}

/// Splunk HTTP Event Collector settings
#[derive(Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Collector endpoint, e.g. `https://splunk:8088/services/collector/event`
    pub hec_url: String,
    /// HEC token sent as `Authorization: Splunk <token>`
    pub hec_token: String,
    /// Target index
    pub index: String,
    /// Verify the collector's TLS certificate
    pub verify_ssl: bool,
    /// Host label stamped on events
    pub host: String,
    /// Source label stamped on events
    pub source: String,
    /// Retry policy for rejected events
    pub retry: RetrySettings,
    /// Events in flight per batch
    pub delivery_concurrency: usize,
}

impl SinkConfig {
    /// Settings with default index, labels, TLS verification and no retries
    #[must_use]
    pub fn new(hec_url: impl Into<String>, hec_token: impl Into<String>) -> Self {
        Self {
            hec_url: hec_url.into(),
            hec_token: hec_token.into(),
            index: splunk::DEFAULT_INDEX.to_owned(),
            verify_ssl: true,
            host: splunk::DEFAULT_HOST.to_owned(),
            source: splunk::DEFAULT_SOURCE.to_owned(),
            retry: RetrySettings::default(),
            delivery_concurrency: defaults::DELIVERY_CONCURRENCY,
        }
    }

    /// Override the target index
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkConfig")
            .field("hec_url", &self.hec_url)
            .field("hec_token", &redact(&self.hec_token))
            .field("index", &self.index)
            .field("verify_ssl", &self.verify_ssl)
            .field("host", &self.host)
            .field("source", &self.source)
            .field("retry", &self.retry)
            .field("delivery_concurrency", &self.delivery_concurrency)
            .finish()
    }
}

/// Complete configuration for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Source API settings
    pub oura: SourceConfig,
    /// Sink settings
    pub splunk: SinkConfig,
    /// Days covered by the fetch window
    pub days_to_fetch: u32,
    /// Resource kinds to sync, in order
    pub resources: Vec<ResourceKind>,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            oura: SourceConfig::default(),
            splunk: SinkConfig::default(),
            days_to_fetch: defaults::DAYS_TO_FETCH,
            resources: ResourceKind::DEFAULT_ORDER.to_vec(),
            http: HttpClientConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Configuration from the given source and sink with default run options
    #[must_use]
    pub fn new(oura: SourceConfig, splunk: SinkConfig) -> Self {
        Self {
            oura,
            splunk,
            ..Self::default()
        }
    }

    /// Load configuration from process environment, honouring a `.env` file
    ///
    /// Required settings are not checked here; call [`SyncConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` when a numeric or list value cannot be parsed
    pub fn from_env() -> SyncResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` when a numeric or list value cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).unwrap_or_default();
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let oura = SourceConfig {
            api_token: get(env_keys::OURA_API_TOKEN),
            base_url: get_or(env_keys::OURA_BASE_URL, oura::BASE_URL),
            max_pages: parse_or(&lookup, env_keys::OURA_MAX_PAGES, oura::DEFAULT_MAX_PAGES)?,
        };

        let splunk = SinkConfig {
            hec_url: get(env_keys::SPLUNK_HEC_URL),
            hec_token: get(env_keys::SPLUNK_HEC_TOKEN),
            index: get_or(env_keys::SPLUNK_INDEX, splunk::DEFAULT_INDEX),
            verify_ssl: get_or(env_keys::SPLUNK_VERIFY_SSL, "true").to_lowercase() == "true",
            host: get_or(env_keys::SPLUNK_HOST, splunk::DEFAULT_HOST),
            source: get_or(env_keys::SPLUNK_SOURCE, splunk::DEFAULT_SOURCE),
            retry: RetrySettings {
                max_retries: parse_or(
                    &lookup,
                    env_keys::SPLUNK_MAX_RETRIES,
                    defaults::MAX_RETRIES,
                )?,
                base_delay_ms: parse_or(
                    &lookup,
                    env_keys::SPLUNK_RETRY_BASE_DELAY_MS,
                    defaults::RETRY_BASE_DELAY_MS,
                )?,
            },
            delivery_concurrency: parse_or(
                &lookup,
                env_keys::SPLUNK_DELIVERY_CONCURRENCY,
                defaults::DELIVERY_CONCURRENCY,
            )?,
        };

        let resources = match lookup(env_keys::OURA_RESOURCES).filter(|v| !v.trim().is_empty()) {
            Some(list) => parse_resources(&list)?,
            None => ResourceKind::DEFAULT_ORDER.to_vec(),
        };

        let http = HttpClientConfig {
            timeout_secs: parse_or(
                &lookup,
                env_keys::HTTP_TIMEOUT_SECS,
                defaults::HTTP_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_or(
                &lookup,
                env_keys::HTTP_CONNECT_TIMEOUT_SECS,
                defaults::HTTP_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self {
            oura,
            splunk,
            days_to_fetch: parse_or(&lookup, env_keys::DAYS_TO_FETCH, defaults::DAYS_TO_FETCH)?,
            resources,
            http,
        })
    }

    /// Check required settings and value ranges
    ///
    /// # Errors
    ///
    /// - `MissingSettings` listing every empty required key
    /// - `InvalidSetting` for malformed URLs or zero-valued bounds
    pub fn validate(&self) -> SyncResult<()> {
        let missing: Vec<&'static str> = [
            (env_keys::OURA_API_TOKEN, &self.oura.api_token),
            (env_keys::SPLUNK_HEC_URL, &self.splunk.hec_url),
            (env_keys::SPLUNK_HEC_TOKEN, &self.splunk.hec_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            return Err(SyncError::missing_settings(missing));
        }

        check_url(env_keys::OURA_BASE_URL, &self.oura.base_url)?;
        check_url(env_keys::SPLUNK_HEC_URL, &self.splunk.hec_url)?;

        if self.oura.max_pages == 0 {
            return Err(SyncError::invalid_setting(
                env_keys::OURA_MAX_PAGES,
                "must be at least 1",
            ));
        }
        if self.splunk.delivery_concurrency == 0 {
            return Err(SyncError::invalid_setting(
                env_keys::SPLUNK_DELIVERY_CONCURRENCY,
                "must be at least 1",
            ));
        }
        if self.resources.is_empty() {
            return Err(SyncError::invalid_setting(
                env_keys::OURA_RESOURCES,
                "at least one resource kind is required",
            ));
        }

        Ok(())
    }

    /// Human-readable summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        let resources: Vec<&str> = self.resources.iter().map(|k| k.as_str()).collect();
        format!(
            "Oura Splunk Sync Configuration:\n\
             - Oura API: {} (token: {})\n\
             - Resources: {}\n\
             - Days to fetch: {}\n\
             - HEC URL: {} (token: {})\n\
             - Index: {}\n\
             - Verify TLS: {}\n\
             - Host / Source: {} / {}\n\
             - Retries: {} (base delay {}ms)\n\
             - Delivery concurrency: {}\n\
             - HTTP timeouts: {}s request, {}s connect",
            self.oura.base_url,
            redact(&self.oura.api_token),
            resources.join(", "),
            self.days_to_fetch,
            self.splunk.hec_url,
            redact(&self.splunk.hec_token),
            self.splunk.index,
            self.splunk.verify_ssl,
            self.splunk.host,
            self.splunk.source,
            self.splunk.retry.max_retries,
            self.splunk.retry.base_delay_ms,
            self.splunk.delivery_concurrency,
            self.http.timeout_secs,
            self.http.connect_timeout_secs,
        )
    }
}

/// Parse `key` with `FromStr`, falling back to `default` when unset or blank
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> SyncResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| SyncError::invalid_setting(key, format!("'{raw}': {e}"))),
        _ => Ok(default),
    }
}

/// Parse a comma-separated list of resource kinds, dropping duplicates
fn parse_resources(list: &str) -> SyncResult<Vec<ResourceKind>> {
    let mut kinds = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = name
            .parse::<ResourceKind>()
            .map_err(|e| SyncError::invalid_setting(env_keys::OURA_RESOURCES, e.to_string()))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

fn check_url(key: &'static str, value: &str) -> SyncResult<()> {
    let url = Url::parse(value)
        .map_err(|e| SyncError::invalid_setting(key, format!("'{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SyncError::invalid_setting(
            key,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Mask a secret for logs, keeping only whether it is set
fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
