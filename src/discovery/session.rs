//! Shared state of one top-level discovery run

use crate::discovery::baseline::BaselineCache;
use std::collections::HashSet;
use tokio::sync::RwLock;

/// URLs already admitted for exploration
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: RwLock<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.urls.read().await.contains(url)
    }

    /// Inserts `url`, returning true only for the first insertion
    ///
    /// Membership test and insertion happen under one write lock, so two
    /// racing callers can never both win.
    pub async fn insert(&self, url: &str) -> bool {
        self.urls.write().await.insert(url.to_string())
    }

    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }

    /// Sorted copy of every admitted URL
    pub async fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.read().await.iter().cloned().collect();
        urls.sort();
        urls
    }
}

/// Dedup scope of one enumeration run
///
/// Holds the visited set and the baseline cache. A session is created per
/// top-level run and shared by reference with every node of that run; it
/// only ever grows.
#[derive(Debug, Default)]
pub struct Session {
    visited: VisitedSet,
    baselines: BaselineCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn baselines(&self) -> &BaselineCache {
        &self.baselines
    }

    /// Admission check for an enumeration node
    ///
    /// Rejects nodes deeper than `max_depth` and URLs already admitted;
    /// otherwise records the URL and admits the node.
    pub async fn admit(&self, url: &str, depth: u32, max_depth: u32) -> bool {
        if depth > max_depth {
            return false;
        }
        if self.visited.contains(url).await {
            return false;
        }
        self.visited.insert(url).await
    }
}
