//! Core data types for indexation checking.
//!
//! This module defines the main data structures used throughout the library,
//! including per-URL results, the ordered batch state, progress events and
//! the run configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default search endpoint (ScaleSERP compatible).
pub const DEFAULT_ENDPOINT: &str = "https://api.scaleserp.com/search";

/// Locale parameters sent with every query.
///
/// The three values are opaque to the library: they are passed through to the
/// search API unchanged. Use [`LocaleSelection::resolve`] to build one from
/// the static tables with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSelection {
    country_code: String,
    interface_language_code: String,
    search_domain: String,
}

impl LocaleSelection {
    /// Build a selection from raw codes without checking the tables.
    pub fn new<C, L, D>(country_code: C, interface_language_code: L, search_domain: D) -> Self
    where
        C: Into<String>,
        L: Into<String>,
        D: Into<String>,
    {
        Self {
            country_code: country_code.into(),
            interface_language_code: interface_language_code.into(),
            search_domain: search_domain.into(),
        }
    }

    /// Country code sent as `gl`.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Interface language code sent as `hl`.
    pub fn interface_language_code(&self) -> &str {
        &self.interface_language_code
    }

    /// Search engine domain sent as `google_domain`.
    pub fn search_domain(&self) -> &str {
        &self.search_domain
    }

    /// Query-string fragment as shown to users, e.g. `gl=fr&hl=fr&google_domain=google.fr`.
    pub fn as_query_fragment(&self) -> String {
        format!(
            "gl={}&hl={}&google_domain={}",
            self.country_code, self.interface_language_code, self.search_domain
        )
    }
}

impl Default for LocaleSelection {
    fn default() -> Self {
        Self::new("us", "en", "google.com")
    }
}

/// One unit of work for the checker.
///
/// Created per URL at batch start and consumed by a single check.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub url: String,
    pub locale: LocaleSelection,
    pub api_key: String,
}

impl CheckRequest {
    pub fn new<U: Into<String>, K: Into<String>>(url: U, locale: LocaleSelection, api_key: K) -> Self {
        Self {
            url: url.into(),
            locale,
            api_key: api_key.into(),
        }
    }
}

/// Classification of a single URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    /// At least one organic result came back for the `site:` query
    Indexed,
    /// The query succeeded and returned no organic results
    NotIndexed,
    /// The check itself failed (network, HTTP, malformed response, ...)
    Error,
}

impl IndexStatus {
    /// Value written to the `indexed` column of CSV exports.
    pub fn as_csv_value(&self) -> &'static str {
        match self {
            IndexStatus::Indexed => "yes",
            IndexStatus::NotIndexed => "no",
            IndexStatus::Error => "error",
        }
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStatus::Indexed => write!(f, "Indexed"),
            IndexStatus::NotIndexed => write!(f, "Not indexed"),
            IndexStatus::Error => write!(f, "Error"),
        }
    }
}

/// Result of checking one URL.
///
/// `title` carries the first organic result's title for [`IndexStatus::Indexed`],
/// the failure description for [`IndexStatus::Error`], and is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    pub status: IndexStatus,
    pub title: String,
}

impl CheckResult {
    pub fn indexed<U: Into<String>, T: Into<String>>(url: U, title: T) -> Self {
        Self {
            url: url.into(),
            status: IndexStatus::Indexed,
            title: title.into(),
        }
    }

    pub fn not_indexed<U: Into<String>>(url: U) -> Self {
        Self {
            url: url.into(),
            status: IndexStatus::NotIndexed,
            title: String::new(),
        }
    }

    pub fn error<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self {
            url: url.into(),
            status: IndexStatus::Error,
            title: message.into(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.status == IndexStatus::Indexed
    }
}

/// Ordered results of one batch, position `i` belonging to input URL `i`.
///
/// Only the orchestrator appends to it; callers get it back finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchState {
    results: Vec<CheckResult>,
}

impl BatchState {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn extend_group(&mut self, group: Vec<CheckResult>) {
        self.results.extend(group);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.results.iter()
    }

    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}

impl From<Vec<CheckResult>> for BatchState {
    fn from(results: Vec<CheckResult>) -> Self {
        Self { results }
    }
}

impl<'a> IntoIterator for &'a BatchState {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Progress notification emitted after each group completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// URLs finished so far (cumulative)
    pub completed: usize,
    /// URLs in the whole batch
    pub total: usize,
    /// Human-readable description of the group just finished
    pub description: String,
}

impl ProgressEvent {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Configuration options for a checking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum number of simultaneous requests (group size).
    /// Default: 5, Range: 1-100
    pub concurrency: usize,

    /// Transport timeout for each individual request.
    /// Default: 30 seconds
    #[serde(skip)]
    pub timeout: Duration,

    /// Pause between groups when `concurrency > 1`.
    /// Default: 500ms
    #[serde(skip)]
    pub group_delay: Duration,

    /// Pause between requests when `concurrency == 1`.
    /// Default: 1 second
    #[serde(skip)]
    pub sequential_delay: Duration,

    /// Search API endpoint
    pub endpoint: String,

    /// Locale parameters sent with every query
    pub locale: LocaleSelection,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout: Duration::from_secs(30),
            group_delay: Duration::from_millis(500),
            sequential_delay: Duration::from_secs(1),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: LocaleSelection::default(),
        }
    }
}

impl CheckConfig {
    /// Set the group size. Clamped to 1-100.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between groups.
    pub fn with_group_delay(mut self, delay: Duration) -> Self {
        self.group_delay = delay;
        self
    }

    /// Set the pause between requests in sequential mode.
    pub fn with_sequential_delay(mut self, delay: Duration) -> Self {
        self.sequential_delay = delay;
        self
    }

    /// Point the checker at another endpoint (mock servers, proxies).
    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the locale parameters.
    pub fn with_locale(mut self, locale: LocaleSelection) -> Self {
        self.locale = locale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.group_delay, Duration::from_millis(500));
        assert_eq!(config.sequential_delay, Duration::from_secs(1));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.locale, LocaleSelection::default());
    }

    #[test]
    fn test_concurrency_is_clamped() {
        assert_eq!(CheckConfig::default().with_concurrency(0).concurrency, 1);
        assert_eq!(CheckConfig::default().with_concurrency(500).concurrency, 100);
        assert_eq!(CheckConfig::default().with_concurrency(12).concurrency, 12);
    }

    #[test]
    fn test_result_constructors_couple_title_and_status() {
        let r = CheckResult::indexed("example.com", "Example Domain");
        assert_eq!(r.status, IndexStatus::Indexed);
        assert_eq!(r.title, "Example Domain");

        let r = CheckResult::not_indexed("missing.test");
        assert_eq!(r.status, IndexStatus::NotIndexed);
        assert!(r.title.is_empty());

        let r = CheckResult::error("broken.test", "HTTP 500: Internal Server Error");
        assert_eq!(r.status, IndexStatus::Error);
        assert!(!r.title.is_empty());
    }

    #[test]
    fn test_locale_query_fragment() {
        let locale = LocaleSelection::new("fr", "fr", "google.fr");
        assert_eq!(locale.as_query_fragment(), "gl=fr&hl=fr&google_domain=google.fr");
    }

    #[test]
    fn test_progress_fraction() {
        let event = ProgressEvent {
            completed: 5,
            total: 12,
            description: String::new(),
        };
        assert!((event.fraction() - 5.0 / 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&IndexStatus::NotIndexed).unwrap();
        assert_eq!(json, "\"not_indexed\"");
    }
}
