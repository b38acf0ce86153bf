//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files, merging them
//! with proper precedence rules, and reading `IC_*` environment variables.

use crate::concurrent::MAX_CONCURRENCY;
use crate::error::IndexCheckError;
use crate::locale::LocaleTable;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Group size (simultaneous requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Country label or `gl` code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Interface language label or `hl` code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Search domain label or `google_domain` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Per-request timeout (as string, e.g., "5s", "30s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Pause between groups in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_delay_ms: Option<u64>,

    /// Pause between requests in sequential mode, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential_delay_ms: Option<u64>,

    /// Search API endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format: "text", "csv" or "json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

/// Accepted values of `output.default_format`.
pub const OUTPUT_FORMATS: &[&str] = &["text", "csv", "json"];

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to log which files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, IndexCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IndexCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            IndexCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            IndexCheckError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is the lowest precedence, then the home directory file, then
    /// a file in the current directory.
    pub fn discover_and_load(&self) -> Result<FileConfig, IndexCheckError> {
        let mut merged_config = FileConfig::default();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    if self.verbose {
                        tracing::info!(path = %path.display(), "loaded config file");
                    }
                    merged_config = self.merge_configs(merged_config, config);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                }
            }
        }

        Ok(merged_config)
    }

    /// Configuration file in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./index-check.toml", "./.index-check.toml"]
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Configuration file in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let path = Path::new(&home).join(".index-check.toml");
        path.exists().then_some(path)
    }

    /// Configuration file under the XDG config directory.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("index-check").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations. Values from `higher` win.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower), Some(higher)) => Some(DefaultsConfig {
                    concurrency: higher.concurrency.or(lower.concurrency),
                    country: higher.country.or(lower.country),
                    language: higher.language.or(lower.language),
                    domain: higher.domain.or(lower.domain),
                    timeout: higher.timeout.or(lower.timeout),
                    group_delay_ms: higher.group_delay_ms.or(lower.group_delay_ms),
                    sequential_delay_ms: higher.sequential_delay_ms.or(lower.sequential_delay_ms),
                    endpoint: higher.endpoint.or(lower.endpoint),
                }),
                (lower, higher) => higher.or(lower),
            },
            output: match (lower.output, higher.output) {
                (Some(lower), Some(higher)) => Some(OutputConfig {
                    default_format: higher.default_format.or(lower.default_format),
                }),
                (lower, higher) => higher.or(lower),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), IndexCheckError> {
        if let Some(defaults) = &config.defaults {
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > MAX_CONCURRENCY {
                    return Err(IndexCheckError::config(format!(
                        "Concurrency must be between 1 and {}",
                        MAX_CONCURRENCY
                    )));
                }
            }

            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(IndexCheckError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            let locale_fields = [
                (LocaleTable::Country, &defaults.country),
                (LocaleTable::Language, &defaults.language),
                (LocaleTable::Domain, &defaults.domain),
            ];
            for (table, value) in locale_fields {
                if let Some(value) = value {
                    table
                        .resolve(value)
                        .map_err(|e| IndexCheckError::config(e.to_string()))?;
                }
            }

            if let Some(endpoint) = &defaults.endpoint {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(IndexCheckError::config(format!(
                        "Endpoint '{}' must be an http(s) URL",
                        endpoint
                    )));
                }
            }
        }

        if let Some(format) = config.output.as_ref().and_then(|o| o.default_format.as_ref()) {
            if !OUTPUT_FORMATS.contains(&format.to_lowercase().as_str()) {
                return Err(IndexCheckError::config(format!(
                    "Invalid output format '{}'. Use one of: {}",
                    format,
                    OUTPUT_FORMATS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// Values come from `IC_*` variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub concurrency: Option<usize>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub domain: Option<String>,
    pub timeout: Option<String>,
    pub json: Option<bool>,
    pub csv: Option<bool>,
    pub file: Option<String>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Check if output format conflicts exist (JSON and CSV both set).
    pub fn has_output_format_conflict(&self) -> bool {
        matches!((self.json, self.csv), (Some(true), Some(true)))
    }
}

/// Load configuration from environment variables.
///
/// Invalid values are ignored, with a warning when `verbose` is set.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    EnvConfig {
        api_key: non_empty_env("IC_API_KEY"),
        concurrency: non_empty_env("IC_CONCURRENCY").and_then(|val| {
            match val.parse::<usize>() {
                Ok(c) if (1..=MAX_CONCURRENCY).contains(&c) => Some(c),
                _ => {
                    if verbose {
                        tracing::warn!(
                            "Invalid IC_CONCURRENCY='{}', must be 1-{}",
                            val,
                            MAX_CONCURRENCY
                        );
                    }
                    None
                }
            }
        }),
        country: locale_env("IC_COUNTRY", LocaleTable::Country, verbose),
        language: locale_env("IC_LANGUAGE", LocaleTable::Language, verbose),
        domain: locale_env("IC_DOMAIN", LocaleTable::Domain, verbose),
        timeout: non_empty_env("IC_TIMEOUT").and_then(|val| {
            if parse_timeout_string(&val).is_some() {
                Some(val)
            } else {
                if verbose {
                    tracing::warn!("Invalid IC_TIMEOUT='{}', use format like '5s', '30s', '2m'", val);
                }
                None
            }
        }),
        json: bool_env("IC_JSON", verbose),
        csv: bool_env("IC_CSV", verbose),
        file: non_empty_env("IC_FILE"),
        config: non_empty_env("IC_CONFIG"),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn bool_env(name: &str, verbose: bool) -> Option<bool> {
    let val = non_empty_env(name)?;
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            if verbose {
                tracing::warn!("Invalid {}='{}', use true/false", name, val);
            }
            None
        }
    }
}

fn locale_env(name: &str, table: LocaleTable, verbose: bool) -> Option<String> {
    let val = non_empty_env(name)?;
    match table.resolve(&val) {
        Ok(_) => Some(val),
        Err(e) => {
            if verbose {
                tracing::warn!("Ignoring {}: {}", name, e);
            }
            None
        }
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let seconds = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.trim().parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.trim().parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    };

    seconds.filter(|s| *s > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("5s"), Some(5));
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("5"), Some(5));
        assert_eq!(parse_timeout_string("0s"), None);
        assert_eq!(parse_timeout_string("invalid"), None);
        assert_eq!(parse_timeout_string("307445734561825861m"), None);
    }

    #[test]
    fn test_load_valid_config() {
        let temp_file = write_config(
            r#"
[defaults]
concurrency = 8
country = "France"
language = "fr"
domain = "Google France"
timeout = "20s"
group_delay_ms = 250

[output]
default_format = "csv"
"#,
        );

        let manager = ConfigManager::new(false);
        let config = manager.load_file(temp_file.path()).unwrap();

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.concurrency, Some(8));
        assert_eq!(defaults.country.as_deref(), Some("France"));
        assert_eq!(defaults.language.as_deref(), Some("fr"));
        assert_eq!(defaults.timeout.as_deref(), Some("20s"));
        assert_eq!(defaults.group_delay_ms, Some(250));
        assert_eq!(
            config.output.unwrap().default_format.as_deref(),
            Some("csv")
        );
    }

    #[test]
    fn test_invalid_concurrency() {
        let temp_file = write_config("[defaults]\nconcurrency = 0\n");
        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let temp_file = write_config("[defaults]\ncountry = \"Atlantis\"\n");
        let manager = ConfigManager::new(false);
        let err = manager.load_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, IndexCheckError::ConfigError { .. }));
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_invalid_output_format_rejected() {
        let temp_file = write_config("[output]\ndefault_format = \"xml\"\n");
        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let manager = ConfigManager::new(false);
        let err = manager.load_file("/nope/index-check.toml").unwrap_err();
        assert!(matches!(err, IndexCheckError::FileError { .. }));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(10),
                country: Some("France".to_string()),
                timeout: Some("10s".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(3),
                language: Some("German".to_string()),
                ..Default::default()
            }),
            output: Some(OutputConfig {
                default_format: Some("json".to_string()),
            }),
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(3)); // Higher wins
        assert_eq!(defaults.country.as_deref(), Some("France")); // Lower preserved
        assert_eq!(defaults.language.as_deref(), Some("German"));
        assert_eq!(defaults.timeout.as_deref(), Some("10s"));
        assert_eq!(merged.output.unwrap().default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_env_output_conflict() {
        let env = EnvConfig {
            json: Some(true),
            csv: Some(true),
            ..Default::default()
        };
        assert!(env.has_output_format_conflict());
        assert!(!EnvConfig::default().has_output_format_conflict());
    }
}
