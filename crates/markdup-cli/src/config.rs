//! Resolve parsed CLI flags into a validated, immutable run configuration.

use thiserror::Error;

use crate::cli::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Bloom(#[from] bloom::ConfigError),
}

/// Where to read from / write to.
#[derive(Debug, Clone)]
pub enum IoTarget {
    Stdio,
    Path(String),
}

impl IoTarget {
    fn resolve(path: Option<&str>) -> Self {
        match path {
            None | Some("-") => IoTarget::Stdio,
            Some(p) => IoTarget::Path(p.to_string()),
        }
    }
}

/// A validated configuration ready to drive the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub n_items: u64,
    pub fp_rate: f64,
    pub mem_bits: Option<u64>,
    pub workers: usize,
    pub input: IoTarget,
    pub output: IoTarget,
    pub metrics_path: String,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        // Validate the sizing parameters eagerly so a bad `(n, p)` or an
        // infeasible `--mem` override is reported before any I/O opens.
        if let Some(bytes) = args.mem_bytes {
            let bits = bytes.saturating_mul(8);
            bloom::BloomFilter::with_explicit_bits(args.n_items, args.fp_rate, bits)?;
        } else {
            bloom::m_k_min(args.n_items, args.fp_rate)?;
        }

        let metrics_path = args.metrics_path.clone().unwrap_or_else(|| match &args.input {
            Some(path) if path != "-" => format!("{path}.markdup-metrics.txt"),
            _ => "markdup-metrics.txt".to_string(),
        });

        Ok(Self {
            n_items: args.n_items,
            fp_rate: args.fp_rate,
            mem_bits: args.mem_bytes.map(|b| b.saturating_mul(8)),
            workers: args.workers.max(1),
            input: IoTarget::resolve(args.input.as_deref()),
            output: IoTarget::resolve(args.output.as_deref()),
            metrics_path,
        })
    }
}
