//! Command-line surface.

use clap::Parser;

/// Mark PCR/optical duplicate templates in a sequence-alignment stream
/// using a single-pass Bloom filter.
#[derive(Parser, Debug)]
#[command(name = "markdup", version, about)]
pub struct Args {
    /// Expected number of distinct templates.
    #[arg(short = 'n', long = "n-items", default_value_t = 1_000_000_000)]
    pub n_items: u64,

    /// Target false-positive rate for the Bloom filter.
    #[arg(short = 'p', long = "fp-rate", default_value_t = 1e-6)]
    pub fp_rate: f64,

    /// Override the Bloom filter's memory, in bytes, instead of deriving
    /// it from `--n-items`/`--fp-rate`.
    #[arg(short = 'm', long = "mem")]
    pub mem_bytes: Option<u64>,

    /// Number of worker threads.
    #[arg(short = 'w', long = "workers", default_value_t = 1)]
    pub workers: usize,

    /// Path to write the run's metrics summary. Defaults to the input
    /// path with a `.markdup-metrics.txt` suffix, or `markdup-metrics.txt`
    /// when reading from standard input.
    #[arg(long = "metrics")]
    pub metrics_path: Option<String>,

    /// Input path; `-` or omitted means standard input.
    #[arg(long = "input")]
    pub input: Option<String>,

    /// Output path; `-` or omitted means standard output.
    #[arg(long = "output")]
    pub output: Option<String>,

    /// Raise log verbosity. Repeatable.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the derived `(m, k)` sizing for `--n-items`/`--fp-rate` and
    /// exit without reading any input.
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,
}
