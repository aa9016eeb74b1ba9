//! Discovery engine module
//!
//! This module contains the core enumeration logic:
//! - HTTP fetching with a run-wide concurrency cap
//! - HTML parsing for links, titles and meta refreshes
//! - Baseline "not found" fingerprints, cached per base URL
//! - Multi-signal classification of wordlist probes
//! - Recursive, deduplicated, depth-bounded exploration
//! - Plain recursive listing of linked entries

mod baseline;
mod classifier;
mod coordinator;
mod fetcher;
mod listing;
mod parser;
mod session;
mod wordlist;

pub use baseline::{synthetic_probe_url, BaselineCache, BaselineSignature, PROBE_PREFIX};
pub use classifier::{Classifier, Signals, Verdict};
pub use coordinator::{DiscoveredDirectory, DiscoverySource, EnumerationSummary, Enumerator};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
pub use listing::{Lister, ListingSummary};
pub use parser::{extract_links, is_subdirectory_link, parse_html, ParsedPage};
pub use session::{Session, VisitedSet};
pub use wordlist::{default_wordlist, load_wordlist, resolve_wordlist, COMMON_DIRECTORIES};

use crate::config::Config;
use crate::output::ProgressSink;
use crate::BurrowError;
use std::sync::Arc;

/// Enumerates `base_url` with the given configuration
///
/// Convenience wrapper that builds an [`Enumerator`] and runs it in a
/// fresh session.
///
/// # Example
///
/// ```no_run
/// use burrow::config::Config;
/// use burrow::discovery::enumerate;
/// use burrow::output::MemorySink;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), burrow::BurrowError> {
/// let sink = Arc::new(MemorySink::new());
/// let summary = enumerate(&Config::default(), "http://example.com", sink.clone()).await?;
/// println!(
///     "{} directories, {} confirmed by probing",
///     summary.directories.len(),
///     sink.confirmed_candidates().len()
/// );
/// # Ok(())
/// # }
/// ```
pub async fn enumerate(
    config: &Config,
    base_url: &str,
    sink: Arc<dyn ProgressSink>,
) -> Result<EnumerationSummary, BurrowError> {
    let enumerator = Arc::new(Enumerator::new(config, sink)?);
    Ok(enumerator.run(base_url).await)
}
