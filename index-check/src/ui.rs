//! Text-mode display logic for index-check CLI.
//!
//! This module handles all human-readable output: the run header, the
//! progress line, the summary dashboard, grouped result tables and the locale
//! listing. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use index_check_lib::{
    CheckResult, IndexStatus, LocaleSelection, LocaleTable, ProgressEvent, Report, StatusSummary,
};
use std::path::Path;
use std::time::Duration;

const URL_WIDTH: usize = 50;
const PROGRESS_WIDTH: usize = 30;

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a text run.
pub fn print_header(url_count: usize, concurrency: usize, locale: &LocaleSelection) {
    println!(
        "{} {} {}",
        style("index-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!("| Checking {}", plural(url_count, "URL"))).dim(),
    );

    let country = LocaleTable::Country
        .label_for(locale.country_code())
        .unwrap_or(locale.country_code());
    let mode = if concurrency == 1 {
        "sequential".to_string()
    } else {
        format!("{} at a time", concurrency)
    };

    println!(
        "{}",
        style(format!(
            "Country: {} | Domain: {} | Mode: {}",
            country,
            locale.search_domain(),
            mode
        ))
        .dim()
    );
    println!();
}

/// Print the locale parameters sent with each query.
pub fn print_parameters(locale: &LocaleSelection) {
    println!(
        "{} {}",
        style("Current parameters:").dim(),
        style(locale.as_query_fragment()).cyan()
    );
}

// ── Progress ─────────────────────────────────────────────────────────────────

/// A single progress line redrawn on stderr so stdout stays clean.
pub struct ProgressLine {
    term: Term,
    enabled: bool,
}

impl ProgressLine {
    /// Progress is only drawn when enabled and stderr is a terminal.
    pub fn new(enabled: bool) -> Self {
        let term = Term::stderr();
        let enabled = enabled && term.is_term();
        Self { term, enabled }
    }

    pub fn update(&mut self, event: &ProgressEvent) {
        if !self.enabled {
            return;
        }
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "{} {}",
            style(progress_bar(event.fraction(), PROGRESS_WIDTH)).cyan(),
            event.description
        ));
    }

    /// Clear the line once the batch is done.
    pub fn finish(&mut self) {
        if self.enabled {
            let _ = self.term.clear_line();
        }
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

// ── Dashboard ────────────────────────────────────────────────────────────────

/// Rows of the dashboard. The error row only appears when errors exist.
fn dashboard_rows(report: &Report) -> Vec<(IndexStatus, StatusSummary)> {
    let mut rows = vec![
        (IndexStatus::Indexed, report.indexed),
        (IndexStatus::NotIndexed, report.not_indexed),
    ];
    if report.has_errors() {
        rows.push((IndexStatus::Error, report.errors));
    }
    rows
}

fn format_summary(summary: &StatusSummary) -> String {
    format!("{} ({:.1}%)", summary.count, summary.percentage)
}

/// Print the summary dashboard with counts and percentages.
pub fn print_dashboard(report: &Report, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} in {:.1}s",
        style(plural(report.total, "URL")).bold(),
        duration.as_secs_f64()
    );

    for (status, summary) in dashboard_rows(report) {
        let name = status.to_string();
        let label = pad_str(&name, 14, Alignment::Left, None);
        let value = format_summary(&summary);
        let value = match status {
            IndexStatus::Indexed => style(value).green(),
            IndexStatus::NotIndexed => style(value).red(),
            IndexStatus::Error => style(value).yellow(),
        };
        println!("  {} {}", style(label).dim(), value);
    }
    println!();
}

// ── Grouped tables ───────────────────────────────────────────────────────────

/// Print results grouped by status: Indexed, Not indexed, Errors.
///
/// Every section is shown; an empty one prints a short note instead of rows.
pub fn print_grouped_results(report: &Report) {
    print_section("Indexed", report.rows(IndexStatus::Indexed), "No URL is indexed", |r| {
        println!(
            "    {}  {}",
            style(pad_str(&r.url, URL_WIDTH, Alignment::Left, Some(".."))).white(),
            style(&r.title).dim()
        );
    });

    let missing = report.rows(IndexStatus::NotIndexed);
    print_section("Not indexed", missing, "Every checked URL is indexed", |r| {
        println!("    {}", style(&r.url).white());
    });

    print_section("Errors", report.rows(IndexStatus::Error), "No errors", |r| {
        println!(
            "    {}  {}",
            style(pad_str(&r.url, URL_WIDTH, Alignment::Left, Some(".."))).white(),
            style(&r.title).yellow()
        );
    });
}

fn print_section<F>(title: &str, rows: &[CheckResult], empty_note: &str, print_row: F)
where
    F: Fn(&CheckResult),
{
    let heading = format!("── {} ({}) ", title, rows.len());
    let rule = "─".repeat(52usize.saturating_sub(heading.chars().count()));
    println!("  {} {}", style(heading).bold(), style(rule).dim());

    if rows.is_empty() {
        println!("    {}", style(empty_note).dim());
    }
    for row in rows {
        print_row(row);
    }
    println!();
}

/// Confirm where the CSV export was written.
pub fn print_export_notice(path: &Path) {
    println!(
        "{} {}",
        style("Results exported to").dim(),
        style(path.display()).bold()
    );
}

// ── Locale listing ───────────────────────────────────────────────────────────

/// Print all three locale tables.
pub fn print_locales() {
    let sections = [
        ("Countries", LocaleTable::Country),
        ("Interface languages", LocaleTable::Language),
        ("Search domains", LocaleTable::Domain),
    ];

    for (title, table) in sections {
        println!(
            "{} {}",
            style(title).yellow().bold(),
            style(format!("({})", table.parameter())).dim()
        );
        for (label, code) in table.entries() {
            println!(
                "  {}  {}",
                pad_str(label, 28, Alignment::Left, None),
                style(code).green()
            );
        }
        println!();
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

// ── Tests ────────────────────────────────────────────────────────────────────
