mod cli;
mod config;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use bloom::BloomFilter;
use cli::Args;
use config::{Config, IoTarget};
use dedup_metrics::Metrics;
use dedup_pipeline::PipelineConfig;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("markdup: {err:#}");
            let is_usage_error = err.downcast_ref::<bloom::ConfigError>().is_some()
                || err.downcast_ref::<config::ConfigError>().is_some();
            if is_usage_error {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.dry_run {
        let params = BloomFilter::m_k_min(args.n_items, args.fp_rate)
            .context("computing Bloom filter sizing")?;
        println!("m={} k={}", params.m, params.k);
        return Ok(());
    }

    let config = Config::from_args(&args).context("resolving configuration")?;

    let filter = match config.mem_bits {
        Some(bits) => BloomFilter::with_explicit_bits(config.n_items, config.fp_rate, bits)?,
        None => BloomFilter::new(config.n_items, config.fp_rate)?,
    };
    let metrics = Metrics::new();

    let input: Box<dyn io::BufRead + Send> = match &config.input {
        IoTarget::Stdio => Box::new(BufReader::new(io::stdin())),
        IoTarget::Path(path) => {
            Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("opening input file {path}")
            })?))
        }
    };
    let output: Box<dyn Write + Send> = match &config.output {
        IoTarget::Stdio => Box::new(BufWriter::new(io::stdout())),
        IoTarget::Path(path) => {
            Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("creating output file {path}")
            })?))
        }
    };

    dedup_pipeline::run(
        input,
        output,
        &filter,
        &metrics,
        PipelineConfig {
            workers: config.workers,
            queue_capacity: 64,
        },
    )
    .context("running duplicate-marking pipeline")?;

    let snapshot = metrics.snapshot(&filter);
    tracing::info!(
        templates_seen = snapshot.templates_seen,
        templates_duplicate = snapshot.templates_duplicate,
        "pipeline complete"
    );
    std::fs::write(&config.metrics_path, snapshot.to_summary_text())
        .with_context(|| format!("writing metrics summary to {}", config.metrics_path))?;

    Ok(())
}
