use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::metrics::compute_metrics;

/// Identifies one armed stage schedule. Bumped for every accepted run result.
pub type RunId = u64;

/// Sentinel shown as the last mission of an empty batch.
pub const NO_MISSION: &str = "N/A";

/// One launch record as returned by the source.
///
/// Only the fields the pipeline reads are typed; everything else the source
/// sent is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date_utc: Option<String>,
    /// `None` when the source has no outcome yet (typically upcoming launches).
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub upcoming: bool,
    #[serde(default)]
    pub rocket: Option<String>,
    #[serde(default)]
    pub launchpad: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Launch {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    pub fn status(&self) -> LaunchStatus {
        if self.is_success() {
            LaunchStatus::Success
        } else if self.upcoming {
            LaunchStatus::Upcoming
        } else {
            LaunchStatus::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    Success,
    Upcoming,
    Failed,
}

/// Aggregate counts over exactly one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub rows_in: usize,
    pub rows_out: usize,
    pub dedup_removed: usize,
    pub upcoming: usize,
    #[serde(rename = "lastMission")]
    pub last_mission: String,
}

/// Batch, metrics and provenance produced by one acquisition.
///
/// Serializes to the same shape the restart control endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub launches: Vec<Launch>,
    pub metrics: Metrics,
    pub source_url: String,
    pub fallback_used: bool,
    pub fetched_at: DateTime<Utc>,
}

impl RunResult {
    pub fn new(
        launches: Vec<Launch>,
        source_url: impl Into<String>,
        fallback_used: bool,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let metrics = compute_metrics(&launches);
        Self {
            launches,
            metrics,
            source_url: source_url.into(),
            fallback_used,
            fetched_at,
        }
    }

    /// Pretty JSON of the batch, for the raw payload view.
    pub fn raw_payload_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.launches)
    }

    /// Short label for where the batch came from: the source host, or the raw
    /// source string when it is not a parseable URL.
    pub fn origin_label(&self) -> String {
        source_host(&self.source_url)
    }
}

pub fn source_host(source_url: &str) -> String {
    url::Url::parse(source_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| source_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_keeps_unknown_fields_and_accepts_null_success() {
        let raw = r#"{
            "id": "x1",
            "name": "Crew-9",
            "date_utc": "2024-09-28T17:17:00.000Z",
            "success": null,
            "upcoming": true,
            "rocket": "5e9d0d95eda69973a809d1ec",
            "launchpad": "5e9e4501f509094ba4566f84",
            "flight_number": 187,
            "payloads": ["p1"]
        }"#;
        let launch: Launch = serde_json::from_str(raw).unwrap();
        assert_eq!(launch.success, None);
        assert!(launch.upcoming);
        assert_eq!(launch.status(), LaunchStatus::Upcoming);
        assert_eq!(launch.extra.get("flight_number"), Some(&Value::from(187)));

        let back = serde_json::to_value(&launch).unwrap();
        assert_eq!(back["payloads"], serde_json::json!(["p1"]));
    }

    #[test]
    fn launch_without_name_is_rejected() {
        let raw = r#"{ "id": "x1", "success": true }"#;
        assert!(serde_json::from_str::<Launch>(raw).is_err());
    }

    #[test]
    fn source_host_falls_back_to_raw_string() {
        assert_eq!(
            source_host("https://api.spacexdata.com/v5/launches"),
            "api.spacexdata.com"
        );
        assert_eq!(source_host("not a url"), "not a url");
    }

    #[test]
    fn run_result_serializes_control_payload_shape() {
        let fetched_at = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let run = RunResult::new(Vec::new(), "https://example.com/l", true, fetched_at);
        let value = serde_json::to_value(&run).unwrap();

        assert_eq!(value["sourceUrl"], "https://example.com/l");
        assert_eq!(value["fallbackUsed"], true);
        assert_eq!(value["metrics"]["lastMission"], NO_MISSION);
        assert!(value["launches"].as_array().unwrap().is_empty());
        assert!(value["fetchedAt"].as_str().unwrap().starts_with("2025-01-01T00:00:00"));
    }
}
