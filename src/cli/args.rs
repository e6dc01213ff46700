//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, WindowStrategy};

/// Arlo recording downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "arlo-downloader",
    version,
    about = "Download recorded videos from an Arlo camera library",
    long_about = "A CLI tool to download every recording of the last N days from an Arlo \
                  account into a local directory.\n\n\
                  Already downloaded recordings are skipped, so runs can be repeated safely."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Arlo account email.
    #[arg(short, long, env = "ARLO_EMAIL")]
    pub email: Option<String>,

    /// Arlo account password.
    #[arg(short, long, env = "ARLO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Number of days back from today to download (0 = today only).
    #[arg(long)]
    pub days: Option<u32>,

    /// Number of concurrent download workers.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Directory recordings are written to.
    #[arg(short = 'd', long = "directory")]
    pub output_directory: Option<PathBuf>,

    /// How the date range is split into library queries.
    #[arg(long, value_enum)]
    pub strategy: Option<WindowStrategyArg>,

    /// Only log warnings and errors.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI window strategy argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowStrategyArg {
    /// One library query per calendar day.
    Daily,
    /// A single library query for the whole range.
    Single,
}

impl From<WindowStrategyArg> for WindowStrategy {
    fn from(arg: WindowStrategyArg) -> Self {
        match arg {
            WindowStrategyArg::Daily => WindowStrategy::Daily,
            WindowStrategyArg::Single => WindowStrategy::Single,
        }
    }
}

impl Args {
    /// Log level implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(email) = self.email {
            config.account.email = email.trim().to_string();
        }

        if let Some(password) = self.password {
            config.account.password = password;
        }

        if let Some(days) = self.days {
            config.options.days = days;
        }

        if let Some(workers) = self.workers {
            config.options.workers = workers;
        }

        if let Some(dir) = self.output_directory {
            config.options.output_directory = dir;
        }

        if let Some(strategy) = self.strategy {
            config.options.window_strategy = strategy.into();
        }
    }
}
