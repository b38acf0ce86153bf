//! # Index Check Library
//!
//! A small async library for checking whether URLs are indexed by a search
//! engine, using `site:` queries against a ScaleSERP compatible API.
//!
//! URLs are checked in groups of bounded size. Every request of a group runs
//! concurrently and the next group only starts once the whole group has
//! finished, with a short pause in between to stay under API rate limits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use index_check_lib::{summarize, CheckConfig, IndexChecker, LocaleSelection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let locale = LocaleSelection::resolve("France", "French", "Google France")?;
//!     let checker = IndexChecker::with_config(CheckConfig::default().with_locale(locale))?;
//!
//!     let urls = vec!["example.com".to_string(), "example.com/about".to_string()];
//!     let batch = checker
//!         .check_urls(&urls, "my-api-key", |event| println!("{}", event.description))
//!         .await?;
//!
//!     let report = summarize(&batch);
//!     println!("{} of {} indexed", report.indexed.count, report.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Grouped concurrency**: bounded groups with a barrier between them
//! - **Partial failure**: a failed request only marks its own URL as an error
//! - **Locale tables**: country, interface language and search domain lookups
//! - **Reports and exports**: percentages, grouped views, CSV and JSON

pub use checker::{classify_response, Checker, IndexChecker};
pub use concurrent::{BatchOrchestrator, DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig, OUTPUT_FORMATS,
};
pub use error::IndexCheckError;
pub use export::{to_csv, to_json, write_csv, write_csv_file, CSV_HEADER, DEFAULT_EXPORT_FILE};
pub use locale::{LocaleTable, COUNTRIES, DOMAINS, LANGUAGES};
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use report::{percentage, summarize, Report, StatusSummary};
pub use types::{
    BatchState, CheckConfig, CheckRequest, CheckResult, IndexStatus, LocaleSelection,
    ProgressEvent, DEFAULT_ENDPOINT,
};
pub use utils::{parse_url_list, read_urls_from_file, validate_batch_input};

// Internal modules, exposed through the re-exports above
mod checker;
mod concurrent;
mod config;
mod error;
mod export;
mod locale;
mod pacing;
mod report;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, IndexCheckError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
