use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::time::Duration;

use super::{ReadingSource, SourceError};
use crate::flow::Reading;

/// Polls `data.json` on the inverter bridge.
///
/// The token travels both as a `token` query parameter and as a bearer
/// header; the bridge accepts either. A millisecond cache-buster keeps
/// intermediaries from replaying a stale body.
#[derive(Clone)]
pub struct HttpReadingSource {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpReadingSource {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, token, client })
    }

    fn url(&self) -> String {
        format!("{}/data.json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReadingSource for HttpReadingSource {
    async fn fetch(&self) -> Result<Reading, SourceError> {
        let cache_buster = Utc::now().timestamp_millis().to_string();
        let resp = self
            .client
            .get(self.url())
            .query(&[("token", self.token.as_str()), ("_", cache_buster.as_str())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
