//! Progress event types and the sink trait
//!
//! The discovery engine never prints. Every observable step is turned into a
//! [`ProgressEvent`] and handed to a [`ProgressSink`] the moment it happens,
//! so events from sibling branches interleave in completion order.

use crate::discovery::Signals;
use std::fmt;

/// A single observable step of an enumeration or listing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A node passed admission and is about to be fetched
    Enumerating { url: String, depth: u32 },

    /// The node's own page came back empty (failure, timeout or empty body)
    NoResponse { url: String, depth: u32 },

    /// A wordlist candidate scored at or above the confirmation threshold
    Confirmed {
        base_url: String,
        candidate: String,
        depth: u32,
        signals: Signals,
    },

    /// A discovered directory is being descended into
    Descending {
        parent: String,
        entry: String,
        depth: u32,
    },

    /// A listing node is about to be fetched
    Listing { url: String, depth: u32 },

    /// A listing node's page came back empty
    ListingFailed { url: String, depth: u32 },

    /// A listing node's page had no anchors at all
    NoLinks { url: String, depth: u32 },

    /// A listing node's anchors were all self/parent references
    NoEntries { url: String, depth: u32 },

    /// A non-directory entry found while listing
    File {
        parent: String,
        name: String,
        depth: u32,
    },
}

impl ProgressEvent {
    /// Depth of the node this event belongs to
    pub fn depth(&self) -> u32 {
        match self {
            Self::Enumerating { depth, .. }
            | Self::NoResponse { depth, .. }
            | Self::Confirmed { depth, .. }
            | Self::Descending { depth, .. }
            | Self::Listing { depth, .. }
            | Self::ListingFailed { depth, .. }
            | Self::NoLinks { depth, .. }
            | Self::NoEntries { depth, .. }
            | Self::File { depth, .. } => *depth,
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumerating { url, .. } => write!(f, "Enumerating: {}", url),
            Self::NoResponse { .. } => write!(f, "(no response or empty)"),
            Self::Confirmed {
                candidate, signals, ..
            } => write!(f, "[ OK ] {}  ({})", candidate, signals),
            Self::Descending { entry, .. } => write!(f, "[{}]", entry),
            Self::Listing { url, .. } => write!(f, "Listing: {}", url),
            Self::ListingFailed { .. } => write!(f, "(failed to fetch or empty content)"),
            Self::NoLinks { .. } => write!(f, "(no links found)"),
            Self::NoEntries { .. } => write!(f, "(no files or directories found)"),
            Self::File { name, .. } => write!(f, "  {}", name),
        }
    }
}

/// Receiver of progress events
///
/// Implementations are shared by every concurrent task of a run, so `emit`
/// takes `&self` and must be cheap; it is called inline on the task that
/// produced the event.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}
