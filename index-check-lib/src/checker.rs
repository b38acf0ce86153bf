//! Indexation checker.
//!
//! This module provides [`IndexChecker`], which performs one `site:`-scoped
//! search query per URL and classifies the outcome, and the [`Checker`] trait
//! the batch orchestrator is generic over.
//!
//! A check never fails from the caller's point of view: transport errors,
//! timeouts, HTTP error statuses and malformed bodies all become a
//! [`CheckResult`] with [`IndexStatus::Error`](crate::IndexStatus::Error).

use crate::concurrent::BatchOrchestrator;
use crate::error::IndexCheckError;
use crate::pacing::FixedDelay;
use crate::types::{BatchState, CheckConfig, CheckRequest, CheckResult, LocaleSelection, ProgressEvent};
use crate::utils::validate_batch_input;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Anything that can turn a [`CheckRequest`] into a [`CheckResult`].
///
/// Implementations must not fail: every request yields exactly one result.
pub trait Checker {
    fn check(&self, request: CheckRequest) -> impl Future<Output = CheckResult> + Send;
}

/// Checker backed by a ScaleSERP-compatible search API.
///
/// # Example
///
/// ```rust,no_run
/// use index_check_lib::{IndexChecker, LocaleSelection};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = IndexChecker::new()?;
///     let locale = LocaleSelection::resolve("France", "French", "Google France")?;
///     let result = checker.check_url("example.com", "my-api-key", &locale).await;
///     println!("{}: {}", result.url, result.status);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct IndexChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// HTTP client shared by all requests (connection pooling)
    http_client: reqwest::Client,
}

impl IndexChecker {
    /// Create a checker with default configuration.
    pub fn new() -> Result<Self, IndexCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use index_check_lib::{CheckConfig, IndexChecker};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(10)
    ///     .with_timeout(Duration::from_secs(15));
    ///
    /// let checker = IndexChecker::with_config(config).unwrap();
    /// assert_eq!(checker.config().concurrency, 10);
    /// ```
    pub fn with_config(config: CheckConfig) -> Result<Self, IndexCheckError> {
        let http_client = build_http_client(config.timeout)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Check a single URL.
    ///
    /// Issues `q=site:{url}` with `num=1` and the locale parameters. The URL
    /// should already be trimmed and non-empty, and `api_key` non-empty; both
    /// are the caller's responsibility.
    pub async fn check_url(&self, url: &str, api_key: &str, locale: &LocaleSelection) -> CheckResult {
        match self.query(url, api_key, locale).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "indexation check failed");
                CheckResult::error(url, e.to_string())
            }
        }
    }

    /// Check a list of URLs in concurrency-bounded groups.
    ///
    /// Validates the input first: an empty key or an empty URL list is
    /// rejected before any request is sent. Results come back in input order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use index_check_lib::IndexChecker;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let checker = IndexChecker::new()?;
    ///     let urls = vec!["example.com/".to_string(), "example.com/about".to_string()];
    ///     let batch = checker
    ///         .check_urls(&urls, "my-api-key", |p| println!("{:.0}%", p.fraction() * 100.0))
    ///         .await?;
    ///     for result in batch.iter() {
    ///         println!("{}: {}", result.url, result.status);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn check_urls<F>(
        &self,
        urls: &[String],
        api_key: &str,
        on_progress: F,
    ) -> Result<BatchState, IndexCheckError>
    where
        F: FnMut(ProgressEvent),
    {
        validate_batch_input(urls, api_key)?;

        let pacer = FixedDelay::new(self.config.group_delay, self.config.sequential_delay);
        let orchestrator = BatchOrchestrator::new(self.config.concurrency).with_pacer(pacer);

        Ok(orchestrator
            .run(self, urls, api_key, &self.config.locale, on_progress)
            .await)
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Replace the configuration, rebuilding the HTTP client.
    pub fn set_config(&mut self, config: CheckConfig) -> Result<(), IndexCheckError> {
        self.http_client = build_http_client(config.timeout)?;
        self.config = config;
        Ok(())
    }

    async fn query(
        &self,
        url: &str,
        api_key: &str,
        locale: &LocaleSelection,
    ) -> Result<CheckResult, IndexCheckError> {
        let query = format!("site:{}", url);
        tracing::debug!(url = %url, endpoint = %self.config.endpoint, "sending search request");

        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&[
                ("api_key", api_key),
                ("q", query.as_str()),
                ("num", "1"),
                ("gl", locale.country_code()),
                ("hl", locale.interface_language_code()),
                ("google_domain", locale.search_domain()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        tracing::debug!(url = %url, status = status.as_u16(), "search response received");

        if !status.is_success() {
            let reason = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| api_error_message(&json))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(IndexCheckError::http_status(status.as_u16(), reason));
        }

        let json: Value = serde_json::from_str(&body).map_err(|e| IndexCheckError::ParseError {
            message: format!("response is not valid JSON: {}", e),
            content: Some(truncate(&body, 200)),
        })?;

        classify_response(url, &json)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> IndexCheckError {
        if err.is_timeout() {
            IndexCheckError::timeout("search request", self.config.timeout)
        } else {
            IndexCheckError::from(err)
        }
    }
}

impl Checker for IndexChecker {
    async fn check(&self, request: CheckRequest) -> CheckResult {
        self.check_url(&request.url, &request.api_key, &request.locale)
            .await
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, IndexCheckError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| IndexCheckError::network_with_source("Failed to create HTTP client", e.to_string()))
}

/// Classify a parsed search response.
///
/// `Indexed` iff `organic_results` is a non-empty list; the title is the first
/// entry's `title` (empty when absent). A missing or null list means
/// `NotIndexed`. Error-shaped bodies and any other shape are errors.
pub fn classify_response(url: &str, json: &Value) -> Result<CheckResult, IndexCheckError> {
    if !json.is_object() {
        return Err(IndexCheckError::unexpected_response(
            "expected a JSON object",
        ));
    }

    if let Some(message) = api_error_message(json) {
        return Err(IndexCheckError::api(message));
    }

    match json.get("organic_results") {
        None | Some(Value::Null) => Ok(CheckResult::not_indexed(url)),
        Some(Value::Array(results)) => match results.first() {
            None => Ok(CheckResult::not_indexed(url)),
            Some(Value::Object(first)) => {
                let title = first.get("title").and_then(Value::as_str).unwrap_or("");
                Ok(CheckResult::indexed(url, title))
            }
            Some(_) => Err(IndexCheckError::unexpected_response(
                "organic result is not an object",
            )),
        },
        Some(_) => Err(IndexCheckError::unexpected_response(
            "organic_results is not a list",
        )),
    }
}

/// Extract the API's own failure message, if the body is error-shaped.
fn api_error_message(json: &Value) -> Option<String> {
    if let Some(info) = json.get("request_info") {
        if info.get("success").and_then(Value::as_bool) == Some(false) {
            let message = info
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request was not successful");
            return Some(message.to_string());
        }
    }

    json.get("error")
        .and_then(Value::as_str)
        .map(|message| message.to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexStatus;
    use serde_json::json;

    #[test]
    fn test_classify_indexed_takes_first_title() {
        let body = json!({
            "request_info": { "success": true },
            "organic_results": [
                { "title": "Example Domain", "link": "https://example.com/" },
                { "title": "Second" }
            ]
        });
        let result = classify_response("example.com", &body).unwrap();
        assert_eq!(result.status, IndexStatus::Indexed);
        assert_eq!(result.title, "Example Domain");
    }

    #[test]
    fn test_classify_indexed_without_title() {
        let body = json!({ "organic_results": [ { "link": "https://example.com/" } ] });
        let result = classify_response("example.com", &body).unwrap();
        assert_eq!(result.status, IndexStatus::Indexed);
        assert_eq!(result.title, "");
    }

    #[test]
    fn test_classify_not_indexed() {
        let empty = json!({ "organic_results": [] });
        assert_eq!(
            classify_response("a.test", &empty).unwrap(),
            CheckResult::not_indexed("a.test")
        );

        let missing = json!({ "search_information": { "total_results": 0 } });
        assert_eq!(
            classify_response("a.test", &missing).unwrap().status,
            IndexStatus::NotIndexed
        );

        let null = json!({ "organic_results": null });
        assert_eq!(
            classify_response("a.test", &null).unwrap().status,
            IndexStatus::NotIndexed
        );
    }

    #[test]
    fn test_classify_error_shaped_body() {
        let body = json!({
            "request_info": { "success": false, "message": "Credits exhausted" }
        });
        let err = classify_response("a.test", &body).unwrap_err();
        assert!(matches!(err, IndexCheckError::ApiError { .. }));
        assert!(err.to_string().contains("Credits exhausted"));

        let body = json!({ "error": "Invalid API key" });
        assert!(classify_response("a.test", &body).is_err());
    }

    #[test]
    fn test_classify_unexpected_shapes() {
        assert!(classify_response("a.test", &json!([1, 2, 3])).is_err());
        assert!(classify_response("a.test", &json!({ "organic_results": "none" })).is_err());
        assert!(classify_response("a.test", &json!({ "organic_results": [42] })).is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
