/// Reading acquisition
///
/// The dashboard consumes readings through a single capability,
/// selected once at startup: the production source polls the inverter
/// bridge over HTTP, the test source hands out an editable in-memory
/// record. Nothing downstream knows which one it is talking to.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::flow::Reading;

pub use http::HttpReadingSource;
pub use memory::StaticReadingSource;

/// Failures surface as two user-visible categories: authentication
/// rejections and everything else (connect, HTTP status, parse).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading endpoint rejected the token")]
    Unauthorized,

    #[error("reading endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("reading request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("reading payload malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Whether this failure should be shown as an authentication
    /// problem rather than a generic connection problem.
    pub fn is_auth(&self) -> bool {
        matches!(self, SourceError::Unauthorized)
    }
}

#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn fetch(&self) -> Result<Reading, SourceError>;
}
