//! Batch orchestration for indexation checks.
//!
//! The orchestrator partitions a URL list into consecutive groups of at most
//! `concurrency` URLs. Each group is checked concurrently and the next group
//! starts only once every member of the current one has finished (a grouped
//! barrier, not a sliding window). Results are stored in input order, a
//! progress event is emitted after every group, and the configured [`Pacer`]
//! runs between groups.

use crate::checker::Checker;
use crate::pacing::{FixedDelay, Pacer};
use crate::types::{BatchState, CheckRequest, LocaleSelection, ProgressEvent};
use futures::future::join_all;
use std::ops::Range;

/// Group size used when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Upper bound on the group size.
pub const MAX_CONCURRENCY: usize = 100;

/// Drives a [`Checker`] over a whole batch.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator<P = FixedDelay> {
    concurrency: usize,
    pacer: P,
}

impl BatchOrchestrator<FixedDelay> {
    /// Create an orchestrator with the default fixed pacing.
    ///
    /// `concurrency` is clamped to `1..=MAX_CONCURRENCY`; a value of 1 makes
    /// the run strictly sequential with the longer per-request pause.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.clamp(1, MAX_CONCURRENCY),
            pacer: FixedDelay::default(),
        }
    }
}

impl Default for BatchOrchestrator<FixedDelay> {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl<P: Pacer> BatchOrchestrator<P> {
    /// Swap the pacing policy.
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> BatchOrchestrator<Q> {
        BatchOrchestrator {
            concurrency: self.concurrency,
            pacer,
        }
    }

    /// Group size in effect.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Whether this run checks one URL at a time.
    pub fn is_sequential(&self) -> bool {
        self.concurrency == 1
    }

    /// Index ranges of the groups a batch of `total` URLs is split into.
    pub fn plan(&self, total: usize) -> Vec<Range<usize>> {
        (0..total)
            .step_by(self.concurrency)
            .map(|start| start..(start + self.concurrency).min(total))
            .collect()
    }

    /// Check every URL exactly once and return the results in input order.
    ///
    /// `on_progress` is called after each group with the cumulative count.
    /// A failing URL only affects its own result; the batch always runs to
    /// completion.
    pub async fn run<C, F>(
        &self,
        checker: &C,
        urls: &[String],
        api_key: &str,
        locale: &LocaleSelection,
        mut on_progress: F,
    ) -> BatchState
    where
        C: Checker,
        F: FnMut(ProgressEvent),
    {
        let total = urls.len();
        let groups = self.plan(total);
        let group_count = groups.len();
        let mut state = BatchState::with_capacity(total);

        tracing::info!(
            total,
            groups = group_count,
            concurrency = self.concurrency,
            "starting indexation batch"
        );

        for (index, range) in groups.into_iter().enumerate() {
            let checks = urls[range.clone()]
                .iter()
                .map(|url| checker.check(CheckRequest::new(url.as_str(), locale.clone(), api_key)));

            // join_all yields outputs in the order of its inputs, so the group
            // is already sequenced by input position whatever finished first.
            let results = join_all(checks).await;
            state.extend_group(results);

            let event = ProgressEvent {
                completed: state.len(),
                total,
                description: self.describe(&range, urls, total),
            };
            tracing::debug!(
                group = index + 1,
                completed = event.completed,
                total,
                "group finished"
            );
            on_progress(event);

            if index + 1 < group_count {
                self.pacer.pause(self.concurrency).await;
            }
        }

        state
    }

    fn describe(&self, range: &Range<usize>, urls: &[String], total: usize) -> String {
        if self.is_sequential() {
            format!("Checked URL {} of {}: {}", range.end, total, urls[range.start])
        } else {
            format!("Checked URLs {}-{} of {}", range.start + 1, range.end, total)
        }
    }
}
