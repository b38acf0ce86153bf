//! Summary reports over a finished batch.
//!
//! [`summarize`] is a pure function of a [`BatchState`]: it can be called any
//! number of times without touching the network and always yields the same
//! [`Report`].

use crate::types::{BatchState, CheckResult, IndexStatus};
use serde::Serialize;

/// Count and share of one classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusSummary {
    pub count: usize,
    /// `count / total * 100`, rounded to one decimal; 0.0 for an empty batch
    pub percentage: f64,
}

/// Aggregated view of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub total: usize,
    pub indexed: StatusSummary,
    pub not_indexed: StatusSummary,
    pub errors: StatusSummary,
    /// Rows classified `Indexed`, in batch order
    pub indexed_rows: Vec<CheckResult>,
    /// Rows classified `NotIndexed`, in batch order
    pub not_indexed_rows: Vec<CheckResult>,
    /// Rows classified `Error`, in batch order
    pub error_rows: Vec<CheckResult>,
}

impl Report {
    /// Summary for one status.
    pub fn summary(&self, status: IndexStatus) -> StatusSummary {
        match status {
            IndexStatus::Indexed => self.indexed,
            IndexStatus::NotIndexed => self.not_indexed,
            IndexStatus::Error => self.errors,
        }
    }

    /// Rows for one status.
    pub fn rows(&self, status: IndexStatus) -> &[CheckResult] {
        match status {
            IndexStatus::Indexed => &self.indexed_rows,
            IndexStatus::NotIndexed => &self.not_indexed_rows,
            IndexStatus::Error => &self.error_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_errors(&self) -> bool {
        self.errors.count > 0
    }
}

/// Build a [`Report`] from a finished batch.
///
/// An empty batch yields `total = 0` and every percentage `0.0`.
pub fn summarize(batch: &BatchState) -> Report {
    let total = batch.len();

    let rows_with = |status: IndexStatus| -> Vec<CheckResult> {
        batch
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    };

    let indexed_rows = rows_with(IndexStatus::Indexed);
    let not_indexed_rows = rows_with(IndexStatus::NotIndexed);
    let error_rows = rows_with(IndexStatus::Error);

    Report {
        total,
        indexed: status_summary(indexed_rows.len(), total),
        not_indexed: status_summary(not_indexed_rows.len(), total),
        errors: status_summary(error_rows.len(), total),
        indexed_rows,
        not_indexed_rows,
        error_rows,
    }
}

fn status_summary(count: usize, total: usize) -> StatusSummary {
    StatusSummary {
        count,
        percentage: percentage(count, total),
    }
}

/// Share of `count` in `total` as a percentage with one decimal.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
