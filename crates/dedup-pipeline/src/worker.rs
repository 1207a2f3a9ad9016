//! Worker stage: fingerprints a qname-group batch, consults the shared
//! Bloom filter, and marks duplicates.

use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::Mutex;

use align_record::Record;
use bloom::BloomFilter;
use dedup_metrics::Metrics;
use fingerprint::{fingerprint, Fingerprint};

/// Drain batches from the shared work queue until it closes, emitting
/// serialized output lines for each batch to `out_tx`.
pub fn run_worker(
    work_rx: &Mutex<Receiver<Vec<Record>>>,
    out_tx: &SyncSender<Vec<String>>,
    filter: &BloomFilter,
    metrics: &Metrics,
) {
    loop {
        let batch = {
            let rx = work_rx.lock().expect("work queue mutex poisoned");
            rx.recv()
        };
        let Ok(mut batch) = batch else {
            break;
        };
        process_batch(&mut batch, filter, metrics);
        let lines = batch.iter().map(Record::to_line).collect();
        if out_tx.send(lines).is_err() {
            break;
        }
    }
}

/// Decide and apply the duplicate flag for one qname-group batch. Only
/// primary alignments participate in fingerprinting; secondary and
/// supplementary alignments inherit the primary's decision.
fn process_batch(batch: &mut [Record], filter: &BloomFilter, metrics: &Metrics) {
    metrics.record_reads(batch.len() as u64);

    let primaries: Vec<Record> = batch
        .iter()
        .filter(|r| !r.is_secondary() && !r.is_supplementary())
        .cloned()
        .collect();
    let passenger_count = batch.len() - primaries.len();
    if passenger_count > 0 {
        metrics.record_secondary_or_supplementary(passenger_count as u64);
    }

    match fingerprint(&primaries) {
        Fingerprint::Unmapped => {
            metrics.record_template_unmapped();
        }
        Fingerprint::Key(key) => {
            metrics.record_template_seen();
            let is_new = filter.add(&key);
            if !is_new {
                tracing::trace!(qname = %batch[0].qname, "marking template as duplicate");
                metrics.record_template_duplicate();
                for record in batch.iter_mut() {
                    record.mark_duplicate();
                }
            }
        }
    }
}
