// ABOUTME: Utility modules shared by the source and sink clients
// ABOUTME: Currently HTTP client construction with timeouts and TLS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

/// HTTP client configuration and helpers
pub mod http_client;
