//! Run-wide counters, accumulated lock-free across worker threads and
//! merged into a summary at shutdown.

use bloom::BloomFilter;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters updated from any worker thread.
#[derive(Debug, Default)]
pub struct Metrics {
    templates_seen: AtomicU64,
    templates_duplicate: AtomicU64,
    templates_unmapped: AtomicU64,
    secondary_supplementary_passed: AtomicU64,
    reads_processed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_template_seen(&self) {
        self.templates_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_template_duplicate(&self) {
        self.templates_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_template_unmapped(&self) {
        self.templates_unmapped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_secondary_or_supplementary(&self, count: u64) {
        self.secondary_supplementary_passed
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_reads(&self, count: u64) {
        self.reads_processed.fetch_add(count, Ordering::Relaxed);
    }

    /// A consistent point-in-time snapshot, suitable for serialization
    /// into the summary file.
    pub fn snapshot(&self, filter: &BloomFilter) -> MetricsSnapshot {
        MetricsSnapshot {
            templates_seen: self.templates_seen.load(Ordering::Relaxed),
            templates_duplicate: self.templates_duplicate.load(Ordering::Relaxed),
            templates_unmapped: self.templates_unmapped.load(Ordering::Relaxed),
            secondary_supplementary_passed: self
                .secondary_supplementary_passed
                .load(Ordering::Relaxed),
            reads_processed: self.reads_processed.load(Ordering::Relaxed),
            n: filter.n(),
            p: filter.p(),
            m: filter.m(),
            k: filter.k(),
            count_estimate: filter.count_estimate(),
            observed_fp_rate: filter.observed_false_positive_rate(),
        }
    }
}

/// An immutable snapshot of `Metrics`, ready to be rendered to the
/// summary file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub templates_seen: u64,
    pub templates_duplicate: u64,
    pub templates_unmapped: u64,
    pub secondary_supplementary_passed: u64,
    pub reads_processed: u64,
    pub n: u64,
    pub p: f64,
    pub m: u64,
    pub k: u32,
    pub count_estimate: u64,
    pub observed_fp_rate: f64,
}

impl MetricsSnapshot {
    /// Render as the plain-text key/value summary file format.
    pub fn to_summary_text(&self) -> String {
        format!(
            "templates_seen\t{}\n\
             templates_duplicate\t{}\n\
             templates_unmapped\t{}\n\
             secondary_supplementary_passed\t{}\n\
             reads_processed\t{}\n\
             n\t{}\n\
             p\t{:e}\n\
             m\t{}\n\
             k\t{}\n\
             count_estimate\t{}\n\
             observed_fp_rate\t{:e}\n",
            self.templates_seen,
            self.templates_duplicate,
            self.templates_unmapped,
            self.secondary_supplementary_passed,
            self.reads_processed,
            self.n,
            self.p,
            self.m,
            self.k,
            self.count_estimate,
            self.observed_fp_rate,
        )
    }
}
