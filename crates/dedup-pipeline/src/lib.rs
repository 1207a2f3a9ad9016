//! Reader -> workers -> writer pipeline over a shared Bloom filter.
//!
//! One reader thread groups the input into qname batches, `W` worker
//! threads fingerprint and mark each batch, and one writer thread drains
//! the result. The Bloom filter is the only state shared across worker
//! threads; everything else flows through bounded channels.

pub mod error;
pub mod reader;
pub mod worker;
pub mod writer;

use std::io::{BufRead, Write};
use std::sync::mpsc::sync_channel;
use std::sync::Mutex;

use bloom::BloomFilter;
use dedup_metrics::Metrics;

pub use error::PipelineError;

/// Pipeline tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Number of worker threads. Must be at least 1.
    pub workers: usize,
    /// Channel capacity, in batches, for the work and output queues.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            queue_capacity: 64,
        }
    }
}

/// Run the full pipeline to completion: read `input`, mark duplicates
/// using `filter`, write to `output`, and tally `metrics` along the way.
///
/// The writer drains the output queue concurrently with the reader and
/// workers, inside the same scope — it must not wait for the workers to
/// finish first, since workers block on the bounded output queue filling
/// up and only the writer ever drains it.
///
/// Blocks until the stream is fully consumed (or a fatal error occurs).
/// With `config.workers == 1`, input order is preserved on output; with
/// more than one worker, batch order is not preserved, only order within
/// a batch.
pub fn run<R: BufRead + Send, W: Write + Send>(
    input: R,
    output: W,
    filter: &BloomFilter,
    metrics: &Metrics,
    config: PipelineConfig,
) -> Result<(), PipelineError> {
    assert!(config.workers >= 1, "pipeline requires at least one worker");
    tracing::info!(workers = config.workers, "starting duplicate-marking pipeline");

    let (header_tx, header_rx) = sync_channel(1);
    let (work_tx, work_rx) = sync_channel(config.queue_capacity);
    let (out_tx, out_rx) = sync_channel(config.queue_capacity);
    let work_rx = Mutex::new(work_rx);

    let (reader_result, writer_result) = std::thread::scope(|scope| {
        let reader_handle =
            scope.spawn(move || reader::read_and_group(input, header_tx, work_tx));

        let worker_handles: Vec<_> = (0..config.workers)
            .map(|_| {
                let work_rx = &work_rx;
                let out_tx = out_tx.clone();
                scope.spawn(move || worker::run_worker(work_rx, &out_tx, filter, metrics))
            })
            .collect();
        drop(out_tx);

        // Spawned before any join so it drains the output queue while
        // the reader and workers are still producing, not after.
        let writer_handle = scope.spawn(move || writer::drain(output, header_rx, out_rx));

        for handle in worker_handles {
            handle.join().expect("worker thread panicked");
        }
        let reader_result = reader_handle.join().expect("reader thread panicked");
        let writer_result = writer_handle.join().expect("writer thread panicked");

        (reader_result, writer_result)
    });

    writer_result?;
    reader_result?;
    tracing::info!("pipeline finished");
    Ok(())
}
