//! Periodic polling loop and the shared dashboard state it feeds.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::{Config, SourceMode};
use crate::flow::Reading;
use crate::source::{HttpReadingSource, ReadingSource, StaticReadingSource};

/// User-visible link state, with the label and color the panels show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Connecting,
    Connected,
    TestMode,
    AuthFailure,
    ConnectionFailure,
}

impl LinkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Connecting => "Connecting...",
            LinkStatus::Connected => "Connected",
            LinkStatus::TestMode => "Test mode - editable readings",
            LinkStatus::AuthFailure => "Authentication error",
            LinkStatus::ConnectionFailure => "Connection error",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            LinkStatus::Connecting => "#94a3b8",
            LinkStatus::Connected => "#22c55e",
            LinkStatus::TestMode => "#f59e0b",
            LinkStatus::AuthFailure => "#f59e0b",
            LinkStatus::ConnectionFailure => "#ef4444",
        }
    }
}

/// What the renderer reads every cycle. A failed poll only moves the
/// status; the last good reading stays visible, stale rather than
/// blanked.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub reading: Option<Reading>,
    pub received_at: Option<DateTime<Utc>>,
    pub status: LinkStatus,
}

impl Snapshot {
    fn initial() -> Self {
        Self { reading: None, received_at: None, status: LinkStatus::Connecting }
    }
}

/// The dashboard's only shared mutable state: the latest snapshot,
/// refreshed by the poller and read by every render.
pub struct Dashboard {
    source: Arc<dyn ReadingSource>,
    mode: SourceMode,
    snapshot: RwLock<Snapshot>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn ReadingSource>, mode: SourceMode) -> Self {
        Self { source, mode, snapshot: RwLock::new(Snapshot::initial()) }
    }

    /// One polling cycle: fetch, stamp, swap. Overlapping calls are
    /// harmless; the fetch is read-only and last write wins.
    pub async fn refresh(&self) {
        match self.source.fetch().await {
            Ok(reading) => {
                let status = match self.mode {
                    SourceMode::Http => LinkStatus::Connected,
                    SourceMode::Test => LinkStatus::TestMode,
                };
                debug!(%reading, "reading updated");
                let mut snap = self.snapshot.write().await;
                snap.reading = Some(reading);
                snap.received_at = Some(Utc::now());
                snap.status = status;
            }
            Err(e) => {
                warn!(error = %e, "poll failed");
                let status = if e.is_auth() {
                    LinkStatus::AuthFailure
                } else {
                    LinkStatus::ConnectionFailure
                };
                self.snapshot.write().await.status = status;
            }
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }
}

/// Shared application state handed to the API layer.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub dashboard: Arc<Dashboard>,
    /// Present only in test mode; lets the API edit the reading.
    pub test_source: Option<StaticReadingSource>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let (source, test_source): (Arc<dyn ReadingSource>, _) = match cfg.source.mode {
            SourceMode::Http => {
                let http = HttpReadingSource::new(
                    cfg.source.base_url.clone(),
                    cfg.auth.token.clone(),
                    Duration::from_secs(cfg.source.http_timeout_seconds),
                )?;
                (Arc::new(http), None)
            }
            SourceMode::Test => {
                let mem = StaticReadingSource::editable_default();
                (Arc::new(mem.clone()), Some(mem))
            }
        };

        let dashboard = Arc::new(Dashboard::new(source, cfg.source.mode));
        Ok(Self { cfg, dashboard, test_source })
    }
}

/// Spawn the fixed-cadence poll loop. The first tick fires
/// immediately so the dashboard has data before the first render.
pub fn spawn_poller(dashboard: Arc<Dashboard>, poll_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_seconds.max(1)));
        loop {
            interval.tick().await;
            dashboard.refresh().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakySource {
        fail: AtomicBool,
        auth: bool,
    }

    #[async_trait]
    impl ReadingSource for FlakySource {
        async fn fetch(&self) -> Result<Reading, SourceError> {
            if self.fail.load(Ordering::SeqCst) {
                if self.auth {
                    Err(SourceError::Unauthorized)
                } else {
                    Err(SourceError::Status(reqwest::StatusCode::BAD_GATEWAY))
                }
            } else {
                Ok(Reading::new(2500.0, 75.0, -500.0, 1200.0, -300.0))
            }
        }
    }

    #[tokio::test]
    async fn test_starts_connecting() {
        let source = Arc::new(StaticReadingSource::editable_default());
        let dash = Dashboard::new(source, SourceMode::Test);
        let snap = dash.snapshot().await;
        assert_eq!(snap.status, LinkStatus::Connecting);
        assert!(snap.reading.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_reading() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(false), auth: false });
        let dash = Dashboard::new(source.clone(), SourceMode::Http);

        dash.refresh().await;
        let snap = dash.snapshot().await;
        assert_eq!(snap.status, LinkStatus::Connected);
        let reading = snap.reading.expect("first poll stored a reading");

        source.fail.store(true, Ordering::SeqCst);
        dash.refresh().await;
        let snap = dash.snapshot().await;
        assert_eq!(snap.status, LinkStatus::ConnectionFailure);
        assert_eq!(snap.reading, Some(reading), "stale reading stays visible");
    }

    #[tokio::test]
    async fn test_auth_failure_is_its_own_category() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(true), auth: true });
        let dash = Dashboard::new(source, SourceMode::Http);

        dash.refresh().await;
        assert_eq!(dash.snapshot().await.status, LinkStatus::AuthFailure);
    }

    #[tokio::test]
    async fn test_test_mode_reports_test_status() {
        let mem = StaticReadingSource::editable_default();
        let dash = Dashboard::new(Arc::new(mem), SourceMode::Test);

        dash.refresh().await;
        assert_eq!(dash.snapshot().await.status, LinkStatus::TestMode);
    }

    #[tokio::test]
    async fn test_recovery_after_failure() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(true), auth: false });
        let dash = Dashboard::new(source.clone(), SourceMode::Http);

        dash.refresh().await;
        assert_eq!(dash.snapshot().await.status, LinkStatus::ConnectionFailure);

        source.fail.store(false, Ordering::SeqCst);
        dash.refresh().await;
        assert_eq!(dash.snapshot().await.status, LinkStatus::Connected);
    }
}
