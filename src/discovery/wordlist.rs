//! Candidate wordlist for hidden-directory probing

use crate::config::EnumerationConfig;
use crate::ConfigError;
use std::path::Path;

/// Common hidden directory and file names probed under every node
pub const COMMON_DIRECTORIES: &[&str] = &[
    "admin/",
    "private/",
    "secret/",
    "hidden/",
    "config/",
    "backup/",
    "data/",
    "uploads/",
    "files/",
    "tmp/",
    "test/",
    "dev/",
    "logs/",
    "bin/",
    "cgi-bin/",
    ".git/",
    ".svn/",
    ".env/",
    ".htaccess",
    ".htpasswd",
    "db/",
    "db_backup/",
    "old/",
    "new/",
    "staging/",
    "beta/",
    "alpha/",
    "api/",
    "assets/",
    "images/",
    "css/",
    "js/",
];

/// The built-in wordlist as owned strings
pub fn default_wordlist() -> Vec<String> {
    COMMON_DIRECTORIES.iter().map(|w| w.to_string()).collect()
}

/// Loads a wordlist file
///
/// One entry per line; blank lines and `#` comments are skipped and entries
/// are trimmed. Duplicates are dropped, keeping the first occurrence.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::InvalidWordlist(format!("failed to read {}: {}", path.display(), e))
    })?;

    let mut words: Vec<String> = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !words.iter().any(|w| w == line) {
            words.push(line.to_string());
        }
    }

    if words.is_empty() {
        return Err(ConfigError::InvalidWordlist(format!(
            "{} is empty or contains only comments",
            path.display()
        )));
    }

    Ok(words)
}

/// Picks the configured wordlist file, or the built-in list
pub fn resolve_wordlist(config: &EnumerationConfig) -> Result<Vec<String>, ConfigError> {
    match &config.wordlist_path {
        Some(path) => load_wordlist(path),
        None => Ok(default_wordlist()),
    }
}
