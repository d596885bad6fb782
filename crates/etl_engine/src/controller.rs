use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use etl_core::RunResult;

use crate::source::{acquire, resolve_source_url};
use crate::{FetchError, Fetcher};

/// How a restart obtains its fresh run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartRoute {
    /// Re-run source acquisition in process.
    Local,
    /// GET a control endpoint that runs the pipeline and returns the result.
    ControlEndpoint(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RestartError {
    #[error("control endpoint request failed: {0}")]
    Endpoint(#[from] FetchError),
    #[error("control endpoint returned an unreadable payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("restart task aborted: {0}")]
    Aborted(String),
}

/// Orchestrates end-to-end runs against one configured source.
pub struct RunController {
    fetcher: Arc<dyn Fetcher>,
    source_url: String,
    route: RestartRoute,
    busy: AtomicBool,
}

impl RunController {
    pub fn new(fetcher: Arc<dyn Fetcher>, source_url: Option<&str>, route: RestartRoute) -> Self {
        Self {
            fetcher,
            source_url: resolve_source_url(source_url),
            route,
            busy: AtomicBool::new(false),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn run_once(&self) -> RunResult {
        acquire(self.fetcher.as_ref(), Some(&self.source_url)).await
    }

    /// Produces a fresh run. Returns `Ok(None)` without doing any IO when
    /// another restart is still in flight.
    pub async fn restart(&self) -> Result<Option<RunResult>, RestartError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            engine_info!("Restart already in flight; ignoring request");
            return Ok(None);
        };

        let run = match &self.route {
            RestartRoute::Local => self.run_once().await,
            RestartRoute::ControlEndpoint(url) => self.restart_via_endpoint(url).await?,
        };
        engine_info!(
            "Pipeline restarted: {} launches (fallback: {})",
            run.launches.len(),
            run.fallback_used
        );
        Ok(Some(run))
    }

    async fn restart_via_endpoint(&self, url: &str) -> Result<RunResult, RestartError> {
        let body = self.fetcher.get(url).await.map_err(|err| {
            engine_warn!("Restart via {} failed: {}", url, err);
            err
        })?;
        let run = serde_json::from_slice(&body)?;
        Ok(run)
    }
}

/// Holds the busy flag for the duration of one restart.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
