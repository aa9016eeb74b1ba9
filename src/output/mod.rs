//! Output module for progress reporting
//!
//! This module handles:
//! - The typed progress events emitted by enumeration and listing runs
//! - Rendering events as coloured terminal lines
//! - Collecting events in memory for later inspection

mod console;
mod memory;
mod traits;

pub use console::ConsoleSink;
pub use memory::MemorySink;
pub use traits::{NullSink, ProgressEvent, ProgressSink};
