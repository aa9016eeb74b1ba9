use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory-listing phrases checked in probe bodies
pub const DEFAULT_DIRECTORY_PATTERNS: &[&str] = &[
    "Index of",
    "Parent Directory",
    "<title>Index of",
    "Directory listing for",
    "To Parent Directory",
];

/// Status codes that count as evidence a probed path exists
pub const DEFAULT_OK_STATUS_CODES: &[u16] = &[200, 301, 302];

/// Main configuration structure for Burrow
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub request: RequestConfig,
    pub enumeration: EnumerationConfig,
    pub heuristics: HeuristicsConfig,
}

/// Request shaping for every fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Raw Cookie header value
    pub cookies: Option<String>,
}

impl RequestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 2,
            cookies: None,
        }
    }
}

/// Traversal limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnumerationConfig {
    /// Maximum recursion depth for enumeration (root is depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum recursion depth for recursive listing
    #[serde(rename = "max-list-depth")]
    pub max_list_depth: u32,

    /// Ceiling on requests in flight at once across a whole run
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// Optional file replacing the built-in candidate wordlist
    #[serde(rename = "wordlist-path")]
    pub wordlist_path: Option<PathBuf>,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_list_depth: 5,
            max_concurrent_requests: 32,
            wordlist_path: None,
        }
    }
}

/// Tuning knobs of the probe classifier
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Minimum number of signals (out of five) that confirms a candidate
    #[serde(rename = "confirm-threshold")]
    pub confirm_threshold: u8,

    /// Number of leading body bytes compared against the baseline
    #[serde(rename = "signature-length")]
    pub signature_length: usize,

    /// Phrases that mark a body as a directory listing
    #[serde(rename = "directory-patterns")]
    pub directory_patterns: Vec<String>,

    /// Status codes counted by the status signal
    #[serde(rename = "ok-status-codes")]
    pub ok_status_codes: Vec<u16>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            confirm_threshold: 2,
            signature_length: 512,
            directory_patterns: DEFAULT_DIRECTORY_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ok_status_codes: DEFAULT_OK_STATUS_CODES.to_vec(),
        }
    }
}
