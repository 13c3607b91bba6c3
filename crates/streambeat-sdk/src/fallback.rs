//! HTTP fallback snapshot source.
//!
//! When the on-chain bulk read fails, the backend serves an equivalent
//! (possibly stale) snapshot from `GET /api/leaderboard`. Every failure mode
//! here maps to [`Error::Unavailable`](crate::Error::Unavailable); the caller
//! degrades to an empty board rather than propagating it to the UI.

use serde::Deserialize;
use url::Url;

use crate::{config::Config, leaderboard::LeaderboardEntry};

/// Client for the backend snapshot endpoint.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    base_url: Url,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    leaderboard: Vec<LeaderboardEntry>,
}

impl FallbackClient {
    /// Create a fallback client for the configured backend.
    pub fn new(config: &Config) -> Self {
        Self::with_client(config.backend_url.clone(), reqwest::Client::new())
    }

    /// Create a fallback client with an existing HTTP client.
    pub fn with_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    /// Fetch the leaderboard snapshot from the backend.
    pub async fn fetch_snapshot(&self) -> crate::Result<Vec<LeaderboardEntry>> {
        let url = self
            .base_url
            .join("/api/leaderboard")
            .map_err(crate::Error::unavailable)?;
        tracing::trace!(%url, "fetching fallback snapshot");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(crate::Error::unavailable)?;
        let status = resp.status();
        let text = resp.text().await.map_err(crate::Error::unavailable)?;

        if !status.is_success() {
            let snippet: String = text.chars().take(1024).collect();
            return Err(crate::Error::unavailable(format!(
                "fallback http error: {status} body: {snippet}"
            )));
        }

        match serde_json::from_str::<SnapshotResponse>(&text) {
            Ok(body) => Ok(body.leaderboard),
            Err(err) => {
                let snippet: String = text.chars().take(1024).collect();
                Err(crate::Error::unavailable(format!(
                    "malformed snapshot payload: {err} body_snippet: {snippet}"
                )))
            }
        }
    }
}
