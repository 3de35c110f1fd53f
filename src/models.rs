// ABOUTME: Data model for the sync pipeline: resource kinds, fetch window, HEC events and results
// ABOUTME: Records are opaque JSON objects; events wrap them with delivery metadata at send time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

use crate::constants::{oura, splunk::sourcetypes};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One record as returned by the Oura API. Never inspected or mutated.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Categories of health record exposed by the Oura v2 user collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Sleep periods
    Sleep,
    /// Daily activity summaries
    Activity,
    /// Daily readiness summaries
    Readiness,
    /// Heart-rate samples
    #[serde(rename = "heartrate")]
    HeartRate,
    /// Workouts
    Workout,
}

/// How a resource kind expresses its time range in query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStyle {
    /// `start_date` / `end_date` as `YYYY-MM-DD`
    Date,
    /// `start_datetime` / `end_datetime` as `YYYY-MM-DDTHH:MM:SS`
    DateTime,
}

impl ResourceKind {
    /// Every kind the source client can fetch
    pub const ALL: [Self; 5] = [
        Self::Sleep,
        Self::Activity,
        Self::Readiness,
        Self::HeartRate,
        Self::Workout,
    ];

    /// Kinds synced by a default run, in order. Heart-rate is fetchable but not part of it.
    pub const DEFAULT_ORDER: [Self; 4] = [Self::Sleep, Self::Activity, Self::Readiness, Self::Workout];

    /// Endpoint path under the API base URL
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Sleep => oura::SLEEP_ENDPOINT,
            Self::Activity => oura::DAILY_ACTIVITY_ENDPOINT,
            Self::Readiness => oura::DAILY_READINESS_ENDPOINT,
            Self::HeartRate => oura::HEART_RATE_ENDPOINT,
            Self::Workout => oura::WORKOUT_ENDPOINT,
        }
    }

    /// HEC sourcetype label, `None` for fetch-only kinds
    #[must_use]
    pub const fn sourcetype(self) -> Option<&'static str> {
        match self {
            Self::Sleep => Some(sourcetypes::SLEEP),
            Self::Activity => Some(sourcetypes::ACTIVITY),
            Self::Readiness => Some(sourcetypes::READINESS),
            Self::Workout => Some(sourcetypes::WORKOUT),
            Self::HeartRate => None,
        }
    }

    /// Range parameter convention for this kind
    #[must_use]
    pub const fn range_style(self) -> RangeStyle {
        match self {
            Self::HeartRate => RangeStyle::DateTime,
            Self::Sleep | Self::Activity | Self::Readiness | Self::Workout => RangeStyle::Date,
        }
    }

    /// Lowercase name as used in configuration and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Activity => "activity",
            Self::Readiness => "readiness",
            Self::HeartRate => "heartrate",
            Self::Workout => "workout",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a resource kind name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind '{0}' (expected one of: sleep, activity, readiness, heartrate, workout)")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sleep" => Ok(Self::Sleep),
            "activity" | "daily_activity" => Ok(Self::Activity),
            "readiness" | "daily_readiness" => Ok(Self::Readiness),
            "heartrate" | "heart_rate" => Ok(Self::HeartRate),
            "workout" | "workouts" => Ok(Self::Workout),
            other => Err(UnknownResourceKind(other.to_owned())),
        }
    }
}

/// Inclusive date range passed to every fetch of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWindow {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
}

impl FetchWindow {
    /// Window `[today - days, today]`
    #[must_use]
    pub fn ending_on(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Window ending on the local system date
    #[must_use]
    pub fn ending_today(days: u32) -> Self {
        Self::ending_on(chrono::Local::now().date_naive(), days)
    }

    /// Query parameters for `kind`, in the kind's naming convention
    #[must_use]
    pub fn query_params(&self, kind: ResourceKind) -> [(&'static str, String); 2] {
        match kind.range_style() {
            RangeStyle::Date => [
                ("start_date", self.start.to_string()),
                ("end_date", self.end.to_string()),
            ],
            RangeStyle::DateTime => [
                ("start_datetime", format!("{}T00:00:00", self.start)),
                ("end_datetime", format!("{}T23:59:59", self.end)),
            ],
        }
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// HEC event envelope. Borrows the record so the original is never touched.
#[derive(Debug, Clone, Serialize)]
pub struct Event<'a> {
    /// Send-time wall clock as fractional unix seconds
    pub time: f64,
    /// Host label
    pub host: &'a str,
    /// Source label
    pub source: &'a str,
    /// Sourcetype label
    pub sourcetype: &'a str,
    /// Target index
    pub index: &'a str,
    /// The record, forwarded as-is
    pub event: &'a Record,
}

impl<'a> Event<'a> {
    /// Wrap `record` with metadata, stamping the current time
    #[must_use]
    pub fn stamped_now(
        record: &'a Record,
        host: &'a str,
        source: &'a str,
        sourcetype: &'a str,
        index: &'a str,
    ) -> Self {
        Self {
            time: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            host,
            source,
            sourcetype,
            index,
            event: record,
        }
    }
}

/// Delivery accounting for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Events sent (each record counts once, retries included)
    pub attempted: usize,
    /// Events the collector accepted with HTTP 200
    pub succeeded: usize,
}

impl DeliveryResult {
    /// Events that were not accepted
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.succeeded)
    }

    /// True when every attempted event was accepted
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.attempted == self.succeeded
    }
}

impl std::ops::AddAssign for DeliveryResult {
    fn add_assign(&mut self, rhs: Self) {
        self.attempted += rhs.attempted;
        self.succeeded += rhs.succeeded;
    }
}

impl fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.succeeded, self.attempted)
    }
}

/// What happened to one resource kind during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindOutcome {
    /// Resource kind
    pub kind: ResourceKind,
    /// Records returned by the source
    pub fetched: usize,
    /// Delivery result, `None` when nothing was sent
    pub delivery: Option<DeliveryResult>,
}

/// Terminal report of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Window used for every fetch
    pub window: FetchWindow,
    /// Per-kind outcomes in processing order
    pub outcomes: Vec<KindOutcome>,
}

impl SyncReport {
    /// Records fetched across all kinds
    #[must_use]
    pub fn total_fetched(&self) -> usize {
        self.outcomes.iter().map(|o| o.fetched).sum()
    }

    /// Delivery totals across all kinds
    #[must_use]
    pub fn total_delivery(&self) -> DeliveryResult {
        let mut total = DeliveryResult::default();
        for delivery in self.outcomes.iter().filter_map(|o| o.delivery) {
            total += delivery;
        }
        total
    }

    /// Outcome for `kind`, if it was processed
    #[must_use]
    pub fn outcome(&self, kind: ResourceKind) -> Option<&KindOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_seven_days() {
        let window = FetchWindow::ending_on(date(2024, 6, 15), 7);
        assert_eq!(window.start, date(2024, 6, 8));
        assert_eq!(window.end, date(2024, 6, 15));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let window = FetchWindow::ending_on(date(2024, 3, 2), 7);
        assert_eq!(window.start, date(2024, 2, 24));
    }

    #[test]
    fn test_query_params_by_style() {
        let window = FetchWindow::ending_on(date(2024, 6, 15), 7);

        let [start, end] = window.query_params(ResourceKind::Sleep);
        assert_eq!(start, ("start_date", "2024-06-08".to_owned()));
        assert_eq!(end, ("end_date", "2024-06-15".to_owned()));

        let [start, end] = window.query_params(ResourceKind::HeartRate);
        assert_eq!(start, ("start_datetime", "2024-06-08T00:00:00".to_owned()));
        assert_eq!(end, ("end_datetime", "2024-06-15T23:59:59".to_owned()));
    }

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("Sleep".parse::<ResourceKind>(), Ok(ResourceKind::Sleep));
        assert_eq!(
            " daily_readiness ".parse::<ResourceKind>(),
            Ok(ResourceKind::Readiness)
        );
        assert_eq!("heart_rate".parse::<ResourceKind>(), Ok(ResourceKind::HeartRate));
        assert!("steps".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_every_kind_parses_from_its_name() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(kind));
            assert!(!kind.endpoint().is_empty());
        }
        for kind in ResourceKind::DEFAULT_ORDER {
            assert!(ResourceKind::ALL.contains(&kind));
        }
    }

    #[test]
    fn test_heart_rate_is_fetch_only() {
        assert_eq!(ResourceKind::HeartRate.sourcetype(), None);
        assert!(!ResourceKind::DEFAULT_ORDER.contains(&ResourceKind::HeartRate));
        for kind in ResourceKind::DEFAULT_ORDER {
            assert!(kind.sourcetype().is_some());
        }
    }

    #[test]
    fn test_delivery_result_arithmetic() {
        let mut total = DeliveryResult {
            attempted: 5,
            succeeded: 3,
        };
        assert_eq!(total.failed(), 2);
        total += DeliveryResult {
            attempted: 2,
            succeeded: 2,
        };
        assert_eq!(total.to_string(), "5/7");
        assert!(!total.is_complete());
    }
}
