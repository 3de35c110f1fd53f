// ABOUTME: Unified error types for the sync pipeline: configuration, source fetch and delivery errors
// ABOUTME: Hard errors abort a run; DeliveryFailure is soft and only ever counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! # Error Handling
//!
//! Two families of errors exist:
//!
//! - [`SyncError`]: hard failures. A configuration problem or a failed source
//!   fetch stops the run and is returned to the caller.
//! - [`DeliveryFailure`]: soft failures. A single event that the collector did
//!   not accept. The sink logs it and counts it; it never leaves the batch.

use crate::models::ResourceKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for reporting and process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Required setting missing or empty
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// Setting present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Source API answered with a non-success status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// Source API could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable,
    /// Source API answered with something that is not the expected JSON
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Anything else
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Process exit status for this error
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::ConfigMissing | Self::ConfigInvalid => 78,
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::SerializationError => 69,
            Self::InternalError => 70,
        }
    }

    /// Short human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::ExternalServiceError => "The Oura API rejected the request",
            Self::ExternalServiceUnavailable => "The Oura API could not be reached",
            Self::SerializationError => "The Oura API response could not be decoded",
            Self::InternalError => "An unexpected error occurred",
        }
    }
}

/// Hard errors that end a sync run
#[derive(Debug, Error)]
pub enum SyncError {
    /// One or more required settings are missing or empty
    #[error("Configuration error: missing required settings: {}", .keys.join(", "))]
    MissingSettings {
        /// Environment keys that were missing or empty
        keys: Vec<&'static str>,
    },

    /// A setting is present but cannot be used
    #[error("Configuration error: invalid value for {key}: {reason}")]
    InvalidSetting {
        /// Environment key of the offending setting
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The source API answered with a non-2xx status
    #[error("Oura API request for {kind} failed with status {status}: {body}")]
    SourceStatus {
        /// Resource kind being fetched
        kind: ResourceKind,
        /// HTTP status code
        status: u16,
        /// Response body as returned by the API
        body: String,
    },

    /// The source API request did not complete
    #[error("Oura API request for {kind} failed: {source}")]
    SourceTransport {
        /// Resource kind being fetched
        kind: ResourceKind,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The source API body was not the expected JSON envelope
    #[error("Failed to decode Oura API response for {kind}: {reason}")]
    SourceDecode {
        /// Resource kind being fetched
        kind: ResourceKind,
        /// Decoder message
        reason: String,
    },

    /// Any other failure during a run
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// Build a missing-settings error
    #[must_use]
    pub fn missing_settings(keys: Vec<&'static str>) -> Self {
        Self::MissingSettings { keys }
    }

    /// Build an invalid-setting error
    #[must_use]
    pub fn invalid_setting(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key,
            reason: reason.into(),
        }
    }

    /// Build an unexpected error
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// True for configuration problems detected before any network I/O
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSettings { .. } | Self::InvalidSetting { .. }
        )
    }

    /// True for failures of a source fetch
    #[must_use]
    pub const fn is_source_request(&self) -> bool {
        matches!(
            self,
            Self::SourceStatus { .. } | Self::SourceTransport { .. } | Self::SourceDecode { .. }
        )
    }

    /// Resource kind whose fetch failed, if any
    #[must_use]
    pub const fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Self::SourceStatus { kind, .. }
            | Self::SourceTransport { kind, .. }
            | Self::SourceDecode { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Error code for reporting
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingSettings { .. } => ErrorCode::ConfigMissing,
            Self::InvalidSetting { .. } => ErrorCode::ConfigInvalid,
            Self::SourceStatus { .. } => ErrorCode::ExternalServiceError,
            Self::SourceTransport { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::SourceDecode { .. } => ErrorCode::SerializationError,
            Self::Unexpected(_) => ErrorCode::InternalError,
        }
    }
}

/// Result alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// A single event the collector did not accept
#[derive(Debug, Error)]
pub enum DeliveryFailure {
    /// Collector answered with something other than 200
    #[error("HEC rejected event with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request did not complete
    #[error("HEC request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DeliveryFailure {
    /// Whether a retry could plausibly succeed (5xx, 429, transport)
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Transport(_) => true,
        }
    }
}
