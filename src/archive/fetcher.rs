//! HTTP fetcher
//!
//! One plain GET per identifier, stored on success, skipped when the store
//! already holds the key. Transport failures are never fatal: the entry
//! simply stays absent and later stages see a smaller dataset.

use crate::store::ContentStore;
use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Result of one fetch-and-store operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Response body written to the store
    Stored,

    /// Store already held the key; no network call was made
    Skipped,

    /// Transport or HTTP failure; the store entry stays absent
    Failed {
        /// Error description
        reason: String,
    },
}

/// Running totals over a batch of fetch operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchTally {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl FetchTally {
    /// Folds one outcome into the tally
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Stored => self.stored += 1,
            FetchOutcome::Skipped => self.skipped += 1,
            FetchOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Builds the HTTP client used for all archive requests
///
/// No retry and no backoff: a failed identifier is picked up by the next
/// run, which skips everything already stored.
pub fn build_http_client(user_agent: &str) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches `url` and stores the response body under `key`
///
/// Returns `Skipped` without touching the network when the store already
/// holds `key`, making whole-pipeline re-runs cheap and idempotent.
/// Transport errors and non-success statuses are logged and returned as
/// `Failed`; only store I/O problems escalate to `Err`.
pub async fn fetch_into_store(
    client: &Client,
    url: &str,
    store: &ContentStore,
    key: &str,
) -> Result<FetchOutcome> {
    if store.contains(key) {
        tracing::debug!("{} already archived, skipping", key);
        return Ok(FetchOutcome::Skipped);
    }

    tracing::debug!("GET {}", url);
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("GET {} failed: {}", url, e);
            return Ok(FetchOutcome::Failed {
                reason: e.to_string(),
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("GET {} returned {}", url, status);
        return Ok(FetchOutcome::Failed {
            reason: format!("HTTP {}", status),
        });
    }

    match response.bytes().await {
        Ok(body) => {
            store.write(key, &body)?;
            Ok(FetchOutcome::Stored)
        }
        Err(e) => {
            tracing::warn!("GET {} body read failed: {}", url, e);
            Ok(FetchOutcome::Failed {
                reason: e.to_string(),
            })
        }
    }
}
