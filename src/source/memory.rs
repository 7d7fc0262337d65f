use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ReadingSource, SourceError};
use crate::flow::Reading;

/// Test-mode source: an in-memory reading behind a lock.
///
/// Clones share the same record, so a handle kept by the API layer can
/// edit what the poller sees. The record is only ever replaced through
/// [`StaticReadingSource::set`]; there is no other mutable global.
#[derive(Clone)]
pub struct StaticReadingSource {
    reading: Arc<RwLock<Reading>>,
}

impl StaticReadingSource {
    pub fn new(reading: Reading) -> Self {
        Self { reading: Arc::new(RwLock::new(reading)) }
    }

    /// Default editable scenario: midday surplus charging the battery.
    pub fn editable_default() -> Self {
        Self::new(Reading::new(3500.0, 75.0, 2000.0, 1400.0, -37.0))
    }

    /// Replace the reading handed out by subsequent fetches.
    pub async fn set(&self, reading: Reading) {
        *self.reading.write().await = reading;
    }

    pub async fn get(&self) -> Reading {
        self.reading.read().await.clone()
    }
}

#[async_trait]
impl ReadingSource for StaticReadingSource {
    async fn fetch(&self) -> Result<Reading, SourceError> {
        Ok(self.reading.read().await.clone())
    }
}
