use chrono::Utc;
use engine_logging::engine_warn;
use etl_core::{Launch, RunResult};
use serde_json::Value;

use crate::fixture::fallback_launches;
use crate::{FailureKind, FetchError, Fetcher};

pub const DEFAULT_SOURCE_URL: &str = "https://api.spacexdata.com/v5/launches";

/// Only the most recent launches are kept from whatever the source returns.
pub const BATCH_LIMIT: usize = 10;

/// Result of reading the live source, before any substitution happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Live(Vec<Launch>),
    Fallback { reason: FetchError },
}

/// Picks the override when it is set and not blank, else the default endpoint.
pub fn resolve_source_url(override_url: Option<&str>) -> String {
    override_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_SOURCE_URL)
        .to_string()
}

/// Decodes a response body into the tail-bounded batch.
pub fn decode_batch(body: &[u8]) -> Result<Vec<Launch>, FetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(FetchError::new(
            FailureKind::MalformedPayload,
            "expected a JSON array of launches",
        ));
    };

    let skip = items.len().saturating_sub(BATCH_LIMIT);
    items
        .into_iter()
        .skip(skip)
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))
        })
        .collect()
}

/// Reads the live source once and classifies the result.
pub async fn read_source(fetcher: &dyn Fetcher, url: &str) -> SourceOutcome {
    match fetcher.get(url).await.and_then(|body| decode_batch(&body)) {
        Ok(launches) => SourceOutcome::Live(launches),
        Err(reason) => SourceOutcome::Fallback { reason },
    }
}

/// Acquires a batch, substituting the offline fixture on any failure.
/// Never fails; `fetched_at` is stamped when acquisition completes.
pub async fn acquire(fetcher: &dyn Fetcher, source_url: Option<&str>) -> RunResult {
    let url = resolve_source_url(source_url);
    let (launches, fallback_used) = match read_source(fetcher, &url).await {
        SourceOutcome::Live(launches) => (launches, false),
        SourceOutcome::Fallback { reason } => {
            engine_warn!("Launch source {} failed, using offline fixture: {}", url, reason);
            (fallback_launches(), true)
        }
    };
    RunResult::new(launches, url, fallback_used, Utc::now())
}
