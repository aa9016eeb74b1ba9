//! Enumeration coordinator - recursive discovery orchestration
//!
//! This module walks a directory tree node by node. For every node it:
//! - Passes the node through admission (depth ceiling + visited set)
//! - Fetches the node page and resolves the node's baseline
//! - Collects explicit subdirectory links from the page
//! - Probes the candidate wordlist concurrently and keeps confirmed hits
//! - Descends concurrently into every discovered directory
//!
//! A node finishes only after all of its probes and all of its children
//! have finished. Failures never escalate: an empty fetch is simply a
//! negative result.

use crate::config::Config;
use crate::discovery::baseline::BaselineSignature;
use crate::discovery::classifier::{Classifier, Signals};
use crate::discovery::fetcher::{FetchResult, Fetcher};
use crate::discovery::parser::{extract_links, is_subdirectory_link};
use crate::discovery::session::Session;
use crate::discovery::wordlist::resolve_wordlist;
use crate::output::{ProgressEvent, ProgressSink};
use crate::url::{combine_url, normalize_root};
use crate::BurrowError;
use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How a directory came to be known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// Linked explicitly from its parent page
    Link,
    /// Confirmed by probing a wordlist candidate
    Probe(Signals),
}

/// A directory found under some node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDirectory {
    /// URL of the node it was found under
    pub parent: String,
    /// The link target or wordlist entry as found
    pub entry: String,
    /// Absolute URL of the directory
    pub url: String,
    /// Depth the directory would be explored at
    pub depth: u32,
    pub source: DiscoverySource,
}

/// Outcome of one top-level enumeration
#[derive(Debug, Clone)]
pub struct EnumerationSummary {
    /// The base URL the run started from
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Number of nodes admitted for exploration
    pub nodes_visited: usize,
    /// Every admitted node URL, sorted
    pub visited: Vec<String>,
    /// Every discovered directory, parents before their children
    pub directories: Vec<DiscoveredDirectory>,
}

impl EnumerationSummary {
    /// Directories confirmed by probing rather than linked
    pub fn probed(&self) -> impl Iterator<Item = &DiscoveredDirectory> {
        self.directories
            .iter()
            .filter(|d| matches!(d.source, DiscoverySource::Probe(_)))
    }

    /// Directories found directly under `parent`
    pub fn children_of<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'a DiscoveredDirectory> + 'a {
        self.directories.iter().filter(move |d| d.parent == parent)
    }
}

/// Recursive hidden-directory enumerator
pub struct Enumerator {
    fetcher: Fetcher,
    classifier: Classifier,
    wordlist: Vec<String>,
    max_depth: u32,
    signature_length: usize,
    sink: Arc<dyn ProgressSink>,
}

impl Enumerator {
    /// Creates an enumerator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Enumerator)` - Ready to run
    /// * `Err(BurrowError)` - The HTTP client could not be built or the
    ///   configured wordlist could not be loaded
    pub fn new(config: &Config, sink: Arc<dyn ProgressSink>) -> Result<Self, BurrowError> {
        let fetcher = Fetcher::new(
            &config.request,
            config.enumeration.max_concurrent_requests,
        )?;
        let wordlist = resolve_wordlist(&config.enumeration)?;

        Ok(Self {
            fetcher,
            classifier: Classifier::new(&config.heuristics),
            wordlist,
            max_depth: config.enumeration.max_depth,
            signature_length: config.heuristics.signature_length,
            sink,
        })
    }

    /// Replaces the candidate wordlist
    pub fn with_wordlist(mut self, wordlist: Vec<String>) -> Self {
        self.wordlist = wordlist;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn wordlist(&self) -> &[String] {
        &self.wordlist
    }

    /// Enumerates `base_url` in a fresh session
    ///
    /// # Example
    ///
    /// ```no_run
    /// use burrow::config::Config;
    /// use burrow::discovery::Enumerator;
    /// use burrow::output::ConsoleSink;
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> Result<(), burrow::BurrowError> {
    /// let enumerator = Arc::new(Enumerator::new(&Config::default(), Arc::new(ConsoleSink::new()))?);
    /// let summary = enumerator.run("http://example.com").await;
    /// println!("{} directories", summary.directories.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(self: &Arc<Self>, base_url: &str) -> EnumerationSummary {
        self.run_in_session(base_url, Arc::new(Session::new())).await
    }

    /// Enumerates `base_url` sharing an existing session's dedup scope
    ///
    /// The root is normalized first so that a later `/` link back to it
    /// hits the visited set.
    pub async fn run_in_session(
        self: &Arc<Self>,
        base_url: &str,
        session: Arc<Session>,
    ) -> EnumerationSummary {
        let root = normalize_root(base_url);
        let base_url = root.as_str();
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!(
            "Starting enumeration of {} (max depth {}, {} candidates)",
            base_url,
            self.max_depth,
            self.wordlist.len()
        );

        let directories = Arc::clone(self)
            .explore(Arc::clone(&session), base_url.to_string(), 0)
            .await;
        let visited = session.visited().snapshot().await;
        let nodes_visited = visited.len();

        tracing::info!(
            "Enumeration of {} finished: {} nodes, {} directories in {:?}",
            base_url,
            nodes_visited,
            directories.len(),
            start.elapsed()
        );

        EnumerationSummary {
            root: base_url.to_string(),
            started_at,
            elapsed: start.elapsed(),
            nodes_visited,
            visited,
            directories,
        }
    }

    /// Explores one node and, recursively, everything below it
    fn explore(
        self: Arc<Self>,
        session: Arc<Session>,
        url: String,
        depth: u32,
    ) -> BoxFuture<'static, Vec<DiscoveredDirectory>> {
        async move {
            if !session.admit(&url, depth, self.max_depth).await {
                tracing::trace!("Skipping {} at depth {}", url, depth);
                return Vec::new();
            }

            self.sink.emit(ProgressEvent::Enumerating {
                url: url.clone(),
                depth,
            });

            let page = self.fetcher.fetch(&url).await;
            if page.is_empty() {
                self.sink.emit(ProgressEvent::NoResponse {
                    url: url.clone(),
                    depth,
                });
                return Vec::new();
            }

            let baseline = session
                .baselines()
                .get_or_compute(&url, &self.fetcher, self.signature_length)
                .await;

            let mut found: BTreeMap<String, DiscoverySource> = extract_links(page.body())
                .into_iter()
                .filter(|link| is_subdirectory_link(link))
                .map(|link| (link, DiscoverySource::Link))
                .collect();

            let confirmed = self.probe_candidates(&url, depth, &baseline, &found).await;
            found.extend(
                confirmed
                    .into_iter()
                    .map(|(candidate, signals)| (candidate, DiscoverySource::Probe(signals))),
            );

            let mut directories = Vec::with_capacity(found.len());
            let mut children = Vec::new();
            for (entry, source) in found {
                let child_url = combine_url(&url, &entry);
                directories.push(DiscoveredDirectory {
                    parent: url.clone(),
                    entry: entry.clone(),
                    url: child_url.clone(),
                    depth: depth + 1,
                    source,
                });

                if depth >= self.max_depth {
                    continue;
                }

                self.sink.emit(ProgressEvent::Descending {
                    parent: url.clone(),
                    entry,
                    depth,
                });
                children.push(tokio::spawn(Arc::clone(&self).explore(
                    Arc::clone(&session),
                    child_url,
                    depth + 1,
                )));
            }

            for result in join_all(children).await {
                match result {
                    Ok(subtree) => directories.extend(subtree),
                    Err(e) => tracing::warn!("Exploration task under {} failed: {}", url, e),
                }
            }

            directories
        }
        .boxed()
    }

    /// Probes every candidate not already linked, returning confirmed ones
    async fn probe_candidates(
        self: &Arc<Self>,
        base_url: &str,
        depth: u32,
        baseline: &BaselineSignature,
        known: &BTreeMap<String, DiscoverySource>,
    ) -> Vec<(String, Signals)> {
        let probes: Vec<_> = self
            .wordlist
            .iter()
            .filter(|candidate| !known.contains_key(candidate.as_str()))
            .map(|candidate| {
                let this = Arc::clone(self);
                let base_url = base_url.to_string();
                let candidate = candidate.clone();
                let baseline = baseline.clone();
                tokio::spawn(async move {
                    this.probe(&base_url, &candidate, depth, &baseline)
                        .await
                        .map(|signals| (candidate, signals))
                })
            })
            .collect();

        join_all(probes)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::warn!("Probe task under {} failed: {}", base_url, e);
                    None
                }
            })
            .collect()
    }

    /// Fetches and scores one candidate; Some(signals) when confirmed
    async fn probe(
        &self,
        base_url: &str,
        candidate: &str,
        depth: u32,
        baseline: &BaselineSignature,
    ) -> Option<Signals> {
        let probe_url = combine_url(base_url, candidate);

        let (status_code, body) = match self.fetcher.fetch(&probe_url).await {
            FetchResult::Response { status_code, body } if !body.is_empty() => (status_code, body),
            _ => return None,
        };

        let verdict = self
            .classifier
            .classify(&body, status_code, baseline, base_url);
        tracing::debug!(
            "Probe {} -> status {}, score {}/5 ({})",
            probe_url,
            status_code,
            verdict.score,
            verdict.signals
        );

        if !verdict.confirmed {
            return None;
        }

        self.sink.emit(ProgressEvent::Confirmed {
            base_url: base_url.to_string(),
            candidate: candidate.to_string(),
            depth,
            signals: verdict.signals,
        });
        Some(verdict.signals)
    }
}
