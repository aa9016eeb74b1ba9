//! URL handling module for Burrow
//!
//! This module provides relative-link resolution against a directory URL and
//! validation of user-supplied targets.

mod combine;
mod target;

pub use combine::{combine_url, is_absolute};
pub use target::{normalize_root, parse_target};
