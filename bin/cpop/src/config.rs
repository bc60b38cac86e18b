//! Configuration

use std::path::PathBuf;

use clap::{ArgAction, Args};
use tracing_subscriber::EnvFilter;

/// Settings shared by every subcommand
///
/// Each flag falls back to an environment variable; `.env` is loaded first.
#[derive(Args, Clone, Debug)]
pub(crate) struct Config {
    /// Log filter used when `RUST_LOG` is unset (library events use the
    /// `allowlist` target)
    #[arg(long, env = "CPOP_LOG", default_value = "info", global = true)]
    pub(crate) log: String,

    /// Directory for output files that are not given explicitly
    #[arg(long, env = "CPOP_OUTPUT_DIR", default_value = ".", global = true)]
    pub(crate) output_dir: PathBuf,

    /// Pretty-print JSON artifacts
    #[arg(
        long,
        env = "CPOP_PRETTY_JSON",
        default_value_t = true,
        action = ArgAction::Set,
        global = true
    )]
    pub(crate) pretty_json: bool,
}

impl Config {
    /// Install the global tracing subscriber, writing to stderr
    pub(crate) fn init_tracing(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log));
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    /// Resolve an output path, defaulting to `<output_dir>/<default_name>`
    pub(crate) fn output_path(&self, explicit: Option<PathBuf>, default_name: &str) -> PathBuf {
        explicit.unwrap_or_else(|| self.output_dir.join(default_name))
    }
}
