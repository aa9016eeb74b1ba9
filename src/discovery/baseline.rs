//! Baseline "not found" fingerprints
//!
//! Many servers answer unknown paths with `200 OK` and a generic error page,
//! so the status code alone says little. Before probing under a base URL we
//! request a path that almost certainly does not exist there and keep the
//! head of its body. Probes whose head matches that signature are most
//! likely the same error page.

use crate::discovery::fetcher::Fetcher;
use crate::url::combine_url;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use uuid::Uuid;

/// Prefix of the synthetic path requested to learn a baseline
pub const PROBE_PREFIX: &str = "__burrow_probe_";

/// Leading bytes of a "not found" response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineSignature {
    bytes: Vec<u8>,
    length: usize,
}

impl BaselineSignature {
    /// Keeps the first `length` bytes of `body`
    pub fn from_body(body: &str, length: usize) -> Self {
        Self {
            bytes: head(body, length).to_vec(),
            length,
        }
    }

    /// True if the first bytes of `body` equal this signature
    pub fn matches(&self, body: &str) -> bool {
        head(body, self.length) == self.bytes.as_slice()
    }

    /// True when the baseline request produced no body at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Byte prefix of `body`, never splitting past its end
fn head(body: &str, length: usize) -> &[u8] {
    let bytes = body.as_bytes();
    &bytes[..bytes.len().min(length)]
}

/// Builds a fresh synthetic "nonexistent" URL under `base_url`
pub fn synthetic_probe_url(base_url: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    combine_url(base_url, &format!("{}{}/", PROBE_PREFIX, token))
}

/// Per-run cache of baseline signatures keyed by base URL
///
/// Every base URL maps to its own once-cell. Lookups take the read lock;
/// only the first lookup for a base URL takes the write lock to insert the
/// cell. The baseline request itself runs inside the cell, outside the map
/// lock, so concurrent callers for the same base URL all await the single
/// in-flight request while callers for other base URLs are not blocked.
#[derive(Debug, Default)]
pub struct BaselineCache {
    entries: RwLock<HashMap<String, Arc<OnceCell<BaselineSignature>>>>,
}

impl BaselineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature for `base_url`, computing it on first use
    ///
    /// At most one baseline request is issued per base URL for the lifetime
    /// of the cache, however many tasks ask concurrently.
    pub async fn get_or_compute(
        &self,
        base_url: &str,
        fetcher: &Fetcher,
        signature_length: usize,
    ) -> BaselineSignature {
        let cell = self.cell_for(base_url).await;

        cell.get_or_init(|| async {
            let probe_url = synthetic_probe_url(base_url);
            let result = fetcher.fetch(&probe_url).await;
            tracing::debug!(
                "Baseline for {} from {} (status {:?}, {} bytes)",
                base_url,
                probe_url,
                result.status_code(),
                result.body().len()
            );
            BaselineSignature::from_body(result.body(), signature_length)
        })
        .await
        .clone()
    }

    /// Number of base URLs with a cell (computed or in flight)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn cell_for(&self, base_url: &str) -> Arc<OnceCell<BaselineSignature>> {
        if let Some(cell) = self.entries.read().await.get(base_url) {
            return Arc::clone(cell);
        }

        let mut entries = self.entries.write().await;
        Arc::clone(entries.entry(base_url.to_string()).or_default())
    }
}
