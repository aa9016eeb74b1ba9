//! Recursive listing of explicitly linked entries
//!
//! Unlike enumeration, listing never guesses: it walks only what each page
//! links to, splitting anchors into directories (trailing `/`) and files,
//! and descends into every directory up to its own depth ceiling.

use crate::config::Config;
use crate::discovery::fetcher::Fetcher;
use crate::discovery::parser::extract_links;
use crate::discovery::session::VisitedSet;
use crate::output::{ProgressEvent, ProgressSink};
use crate::url::{combine_url, normalize_root};
use crate::BurrowError;
use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one listing run
#[derive(Debug, Clone, Default)]
pub struct ListingSummary {
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Absolute URLs of every listed directory
    pub directories: Vec<String>,
    /// Absolute URLs of every file seen
    pub files: Vec<String>,
}

impl ListingSummary {
    fn absorb(&mut self, other: ListingSummary) {
        self.directories.extend(other.directories);
        self.files.extend(other.files);
    }
}

/// Recursive link lister
pub struct Lister {
    fetcher: Fetcher,
    max_depth: u32,
    sink: Arc<dyn ProgressSink>,
}

impl Lister {
    pub fn new(config: &Config, sink: Arc<dyn ProgressSink>) -> Result<Self, BurrowError> {
        let fetcher = Fetcher::new(
            &config.request,
            config.enumeration.max_concurrent_requests,
        )?;
        Ok(Self {
            fetcher,
            max_depth: config.enumeration.max_list_depth,
            sink,
        })
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lists `base_url` and everything linked below it
    pub async fn run(self: &Arc<Self>, base_url: &str) -> ListingSummary {
        let root = normalize_root(base_url);
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!("Listing {} (max depth {})", root, self.max_depth);

        let visited = Arc::new(VisitedSet::new());
        visited.insert(&root).await;
        let mut summary = Arc::clone(self).list(visited, root.clone(), 0).await;

        summary.root = root;
        summary.started_at = started_at;
        summary.elapsed = start.elapsed();
        tracing::info!(
            "Listing of {} finished: {} directories, {} files",
            summary.root,
            summary.directories.len(),
            summary.files.len()
        );
        summary
    }

    /// Lists one node already recorded in `visited`
    ///
    /// A child directory is recorded, announced and descended into only when
    /// it is within the depth ceiling and wins its visited-set insert.
    fn list(
        self: Arc<Self>,
        visited: Arc<VisitedSet>,
        url: String,
        depth: u32,
    ) -> BoxFuture<'static, ListingSummary> {
        async move {
            let mut summary = ListingSummary::default();

            self.sink.emit(ProgressEvent::Listing {
                url: url.clone(),
                depth,
            });

            let page = self.fetcher.fetch(&url).await;
            if page.is_empty() {
                self.sink.emit(ProgressEvent::ListingFailed { url, depth });
                return summary;
            }

            let links = extract_links(page.body());
            if links.is_empty() {
                self.sink.emit(ProgressEvent::NoLinks { url, depth });
                return summary;
            }

            let (directories, files): (Vec<String>, Vec<String>) = links
                .into_iter()
                .filter(|link| !link.is_empty() && link != "./" && link != "../")
                .partition(|link| link.ends_with('/'));

            if directories.is_empty() && files.is_empty() {
                self.sink.emit(ProgressEvent::NoEntries { url, depth });
                return summary;
            }

            for name in files {
                summary.files.push(combine_url(&url, &name));
                self.sink.emit(ProgressEvent::File {
                    parent: url.clone(),
                    name,
                    depth,
                });
            }

            let mut children = Vec::with_capacity(directories.len());
            for entry in directories {
                let child_url = combine_url(&url, &entry);
                if depth >= self.max_depth || !visited.insert(&child_url).await {
                    tracing::trace!("Skipping {} at depth {}", child_url, depth + 1);
                    continue;
                }

                summary.directories.push(child_url.clone());
                self.sink.emit(ProgressEvent::Descending {
                    parent: url.clone(),
                    entry,
                    depth,
                });
                children.push(tokio::spawn(Arc::clone(&self).list(
                    Arc::clone(&visited),
                    child_url,
                    depth + 1,
                )));
            }

            for result in join_all(children).await {
                match result {
                    Ok(subtree) => summary.absorb(subtree),
                    Err(e) => tracing::warn!("Listing task under {} failed: {}", url, e),
                }
            }

            summary
        }
        .boxed()
    }
}
