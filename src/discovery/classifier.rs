//! Multi-signal scoring of probe responses
//!
//! A probe is scored against five independent signals, one point each. The
//! score is a majority-style hint that a path exists, not proof: the same
//! inputs always give the same verdict, and false positives are expected.

use crate::config::HeuristicsConfig;
use crate::discovery::baseline::BaselineSignature;
use crate::discovery::parser::parse_html;
use crate::url::combine_url;
use std::fmt;

/// Title fragments that mark an error page
const ERROR_TITLE_MARKERS: &[&str] = &["404", "Not Found"];

/// The five boolean signals derived from one probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// Body head differs from the base URL's "not found" baseline
    pub not_baseline: bool,
    /// Status is one of the configured success codes (200/301/302)
    pub status_ok: bool,
    /// Body contains a directory-listing phrase
    pub directory_pattern: bool,
    /// Title is present and does not look like an error page
    pub title_ok: bool,
    /// No meta refresh sends the client back to the base URL
    pub not_redirect_loop: bool,
}

impl Signals {
    /// Number of signals that fired (0..=5)
    pub fn score(&self) -> u8 {
        [
            self.not_baseline,
            self.status_ok,
            self.directory_pattern,
            self.title_ok,
            self.not_redirect_loop,
        ]
        .iter()
        .filter(|fired| **fired)
        .count() as u8
    }

    /// Short names of the signals that fired, in fixed order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::with_capacity(5);
        if self.not_baseline {
            labels.push("not-baseline");
        }
        if self.status_ok {
            labels.push("status-ok");
        }
        if self.directory_pattern {
            labels.push("dir-pattern");
        }
        if self.title_ok {
            labels.push("title-ok");
        }
        if self.not_redirect_loop {
            labels.push("not-redirect");
        }
        labels
    }
}

impl fmt::Display for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        if labels.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", labels.join(" "))
        }
    }
}

/// Outcome of classifying one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub signals: Signals,
    pub score: u8,
    pub confirmed: bool,
}

/// Scores probe responses
#[derive(Debug, Clone)]
pub struct Classifier {
    directory_patterns: Vec<String>,
    ok_status_codes: Vec<u16>,
    threshold: u8,
}

impl Classifier {
    pub fn new(config: &HeuristicsConfig) -> Self {
        Self {
            directory_patterns: config
                .directory_patterns
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            ok_status_codes: config.ok_status_codes.clone(),
            threshold: config.confirm_threshold,
        }
    }

    /// Minimum score that confirms a candidate
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Derives the five signals for a probe of a path under `base_url`
    pub fn signals(
        &self,
        body: &str,
        status_code: u16,
        baseline: &BaselineSignature,
        base_url: &str,
    ) -> Signals {
        let page = parse_html(body);

        let title_ok = page.title.as_deref().is_some_and(|title| {
            !ERROR_TITLE_MARKERS
                .iter()
                .any(|marker| title.contains(marker))
        });

        let redirect_loop = page
            .refresh_targets
            .iter()
            .any(|target| same_location(&combine_url(base_url, target), base_url));

        Signals {
            not_baseline: !baseline.matches(body),
            status_ok: self.ok_status_codes.contains(&status_code),
            directory_pattern: self
                .directory_patterns
                .iter()
                .any(|pattern| body.contains(pattern.as_str())),
            title_ok,
            not_redirect_loop: !redirect_loop,
        }
    }

    /// Scores a probe and applies the confirmation threshold
    pub fn classify(
        &self,
        body: &str,
        status_code: u16,
        baseline: &BaselineSignature,
        base_url: &str,
    ) -> Verdict {
        let signals = self.signals(body, status_code, baseline, base_url);
        let score = signals.score();
        Verdict {
            signals,
            score,
            confirmed: score >= self.threshold,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&HeuristicsConfig::default())
    }
}

/// URL equality ignoring a single trailing slash
fn same_location(a: &str, b: &str) -> bool {
    a.strip_suffix('/').unwrap_or(a) == b.strip_suffix('/').unwrap_or(b)
}
