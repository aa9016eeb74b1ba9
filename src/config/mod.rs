//! Configuration module for Burrow
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: `Config::default()` carries the stock
//! request shaping, traversal limits and classifier tuning.
//!
//! # Example
//!
//! ```no_run
//! use burrow::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("burrow.toml")).unwrap();
//! println!("Enumeration will use max depth: {}", config.enumeration.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EnumerationConfig, HeuristicsConfig, RequestConfig, DEFAULT_DIRECTORY_PATTERNS,
    DEFAULT_OK_STATUS_CODES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
