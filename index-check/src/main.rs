//! Index Check CLI Application
//!
//! A command-line interface for auditing whether URLs are indexed by a search
//! engine. This CLI application provides a user-friendly interface to the
//! index-check-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use index_check_lib::{
    load_env_config, parse_timeout_string, parse_url_list, read_urls_from_file, summarize,
    to_csv, write_csv_file, BatchState, CheckConfig, ConfigManager, EnvConfig, FileConfig,
    IndexCheckError, IndexChecker, LocaleSelection, Report, DEFAULT_EXPORT_FILE, MAX_CONCURRENCY,
};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for index-check
#[derive(Parser, Debug)]
#[command(name = "index-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Check whether URLs are indexed by a search engine")]
#[command(
    long_about = "Check whether URLs are indexed by running a site: query per URL against a ScaleSERP compatible search API.\n\nURLs are checked in concurrent groups; results can be shown as a dashboard or exported as CSV or JSON."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// URLs to check
    #[arg(value_name = "URLS", help_heading = "URL Selection")]
    pub urls: Vec<String>,

    /// Input file with URLs, one per line ("-" reads stdin)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "URL Selection"
    )]
    pub file: Option<String>,

    /// Search API key (or set IC_API_KEY)
    #[arg(long = "api-key", value_name = "KEY", help_heading = "Search API")]
    pub api_key: Option<String>,

    /// Search API endpoint
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Search API")]
    pub endpoint: Option<String>,

    /// Country of the search (label or gl code)
    #[arg(long = "country", value_name = "COUNTRY", help_heading = "Locale")]
    pub country: Option<String>,

    /// Interface language (label or hl code)
    #[arg(long = "language", value_name = "LANGUAGE", help_heading = "Locale")]
    pub language: Option<String>,

    /// Search engine domain (label or domain)
    #[arg(long = "domain", value_name = "DOMAIN", help_heading = "Locale")]
    pub domain: Option<String>,

    /// List supported countries, languages and search domains and exit
    #[arg(long = "list-locales", help_heading = "Locale")]
    pub list_locales: bool,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Also export results as CSV to FILE
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        long_help = "Also export results as CSV to FILE (default: indexation_results.csv).\n\nThe value is optional, so a word right after -o is taken as the file name: put URLs before -o, or use --output=FILE.",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXPORT_FILE,
        help_heading = "Output Format"
    )]
    pub output: Option<PathBuf>,

    /// Simultaneous requests per group (default: 5, max: 100)
    #[arg(short = 'c', long = "concurrency", help_heading = "Performance")]
    pub concurrency: Option<usize>,

    /// Per-request timeout, e.g. "30s" or "2m"
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information and error messages
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn is_structured(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Everything a run needs once all configuration layers are merged.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) config: CheckConfig,
    pub(crate) api_key: String,
    pub(crate) file: Option<String>,
    pub(crate) format: OutputFormat,
}

/// Locale inputs collected across layers before validation.
#[derive(Debug, Default)]
struct LocaleInputs {
    country: Option<String>,
    language: Option<String>,
    domain: Option<String>,
}

impl LocaleInputs {
    fn resolve(&self) -> Result<LocaleSelection, IndexCheckError> {
        let fallback = LocaleSelection::default();
        LocaleSelection::resolve(
            self.country.as_deref().unwrap_or(fallback.country_code()),
            self.language
                .as_deref()
                .unwrap_or(fallback.interface_language_code()),
            self.domain.as_deref().unwrap_or(fallback.search_domain()),
        )
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Handle --list-locales early
    if args.list_locales {
        ui::print_locales();
        return;
    }

    init_tracing(&args);
    tracing::info!("index-check v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_index_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn validate_args(args: &Args) -> Result<(), String> {
    // --list-locales is self-contained, skip other validation
    if args.list_locales {
        return Ok(());
    }

    if args.json && args.csv {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            return Err(format!(
                "Concurrency must be between 1 and {}",
                MAX_CONCURRENCY
            ));
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run_index_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    let urls = get_urls_to_check(&args, settings.file.as_deref())?;

    let checker = IndexChecker::with_config(settings.config)?;
    let locale = checker.config().locale.clone();

    if settings.format.is_structured() {
        tracing::info!(parameters = %locale.as_query_fragment(), "locale parameters");
    } else {
        ui::print_header(urls.len(), checker.config().concurrency, &locale);
        if args.verbose {
            ui::print_parameters(&locale);
        }
    }

    let mut progress = ui::ProgressLine::new(!settings.format.is_structured());
    let start_time = Instant::now();

    let batch = checker
        .check_urls(&urls, &settings.api_key, |event| progress.update(&event))
        .await?;

    let duration = start_time.elapsed();
    progress.finish();

    let report = summarize(&batch);
    display_results(&batch, &report, settings.format, duration)?;

    if let Some(path) = &args.output {
        write_csv_file(&batch, path)?;
        if !settings.format.is_structured() {
            ui::print_export_notice(path);
        }
    }

    Ok(())
}

/// Merge configuration layers into run settings.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (IC_*)
/// 3. Explicit config file (--config or IC_CONFIG), or discovered files
/// 4. Built-in defaults
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let env_config = load_env_config(args.verbose);
    let file_config = load_file_config(args, &env_config)?;

    let mut settings = Settings {
        config: CheckConfig::default(),
        api_key: String::new(),
        file: None,
        format: OutputFormat::Text,
    };
    let mut locale = LocaleInputs::default();

    merge_file_config(&mut settings, &mut locale, file_config);
    merge_env_config(&mut settings, &mut locale, env_config, args.verbose);
    merge_cli_args(&mut settings, &mut locale, args)?;

    settings.config = settings.config.with_locale(locale.resolve()?);

    Ok(settings)
}

fn load_file_config(
    args: &Args,
    env_config: &EnvConfig,
) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    let explicit_path = args
        .config
        .as_deref()
        .or(env_config.config.as_deref());

    match explicit_path {
        Some(path) => {
            tracing::info!(path = %path, "using explicit config file");
            config_manager
                .load_file(path)
                .map_err(|e| format!("Failed to load config file '{}': {}", path, e).into())
        }
        None => Ok(config_manager.discover_and_load()?),
    }
}

fn merge_file_config(settings: &mut Settings, locale: &mut LocaleInputs, file_config: FileConfig) {
    if let Some(defaults) = file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            settings.config = settings.config.clone().with_concurrency(concurrency);
        }
        if let Some(secs) = defaults.timeout.as_deref().and_then(parse_timeout_string) {
            settings.config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = defaults.group_delay_ms {
            settings.config.group_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = defaults.sequential_delay_ms {
            settings.config.sequential_delay = Duration::from_millis(ms);
        }
        if let Some(endpoint) = defaults.endpoint {
            settings.config.endpoint = endpoint;
        }
        locale.country = defaults.country.or(locale.country.take());
        locale.language = defaults.language.or(locale.language.take());
        locale.domain = defaults.domain.or(locale.domain.take());
    }

    if let Some(format) = file_config
        .output
        .and_then(|o| o.default_format)
        .as_deref()
        .and_then(OutputFormat::parse)
    {
        settings.format = format;
    }
}

fn merge_env_config(
    settings: &mut Settings,
    locale: &mut LocaleInputs,
    env_config: EnvConfig,
    verbose: bool,
) {
    if env_config.has_output_format_conflict() && verbose {
        tracing::warn!("Both IC_JSON and IC_CSV are set to true, using JSON");
    }

    if let Some(api_key) = env_config.api_key {
        settings.api_key = api_key;
    }
    if let Some(concurrency) = env_config.concurrency {
        settings.config = settings.config.clone().with_concurrency(concurrency);
    }
    if let Some(secs) = env_config.timeout.as_deref().and_then(parse_timeout_string) {
        settings.config.timeout = Duration::from_secs(secs);
    }
    if env_config.file.is_some() {
        settings.file = env_config.file;
    }

    locale.country = env_config.country.or(locale.country.take());
    locale.language = env_config.language.or(locale.language.take());
    locale.domain = env_config.domain.or(locale.domain.take());

    if env_config.json == Some(true) {
        settings.format = OutputFormat::Json;
    } else if env_config.csv == Some(true) {
        settings.format = OutputFormat::Csv;
    }
}

fn merge_cli_args(
    settings: &mut Settings,
    locale: &mut LocaleInputs,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(api_key) = &args.api_key {
        settings.api_key = api_key.clone();
    }
    if let Some(concurrency) = args.concurrency {
        settings.config = settings.config.clone().with_concurrency(concurrency);
    }
    if let Some(timeout) = &args.timeout {
        let secs = parse_timeout_string(timeout)
            .ok_or_else(|| format!("Invalid timeout '{}'", timeout))?;
        settings.config.timeout = Duration::from_secs(secs);
    }
    if let Some(endpoint) = &args.endpoint {
        settings.config.endpoint = endpoint.clone();
    }
    if args.file.is_some() {
        settings.file = args.file.clone();
    }

    if args.country.is_some() {
        locale.country = args.country.clone();
    }
    if args.language.is_some() {
        locale.language = args.language.clone();
    }
    if args.domain.is_some() {
        locale.domain = args.domain.clone();
    }

    if args.json {
        settings.format = OutputFormat::Json;
    } else if args.csv {
        settings.format = OutputFormat::Csv;
    }

    Ok(())
}

/// Collect URLs from positional arguments, then the input file (if any).
fn get_urls_to_check(
    args: &Args,
    file: Option<&str>,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut urls: Vec<String> = args.urls.iter().map(|u| u.trim().to_string()).collect();

    match file {
        Some("-") => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            urls.extend(parse_url_list(&content));
        }
        Some(path) => {
            let from_file = read_urls_from_file(path)?;
            tracing::info!(path = %path, count = from_file.len(), "loaded URLs from file");
            urls.extend(from_file);
        }
        None => {}
    }

    Ok(urls)
}

fn display_results(
    batch: &BatchState,
    report: &Report,
    format: OutputFormat,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => display_json_results(batch, report)?,
        OutputFormat::Csv => print!("{}", to_csv(batch)),
        OutputFormat::Text => {
            ui::print_dashboard(report, duration);
            ui::print_grouped_results(report);
        }
    }

    Ok(())
}

/// Display results in JSON format: per-URL rows plus the summary counts.
fn display_json_results(
    batch: &BatchState,
    report: &Report,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = serde_json::json!({
        "summary": {
            "total": report.total,
            "indexed": report.indexed,
            "not_indexed": report.not_indexed,
            "errors": report.errors,
        },
        "results": batch,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
