//! CLI for apkfetch.

mod commands;
mod sink;

use anyhow::Result;
use apkfetch_core::config;
use apkfetch_core::logging::LogTarget;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_checksum, run_fetch, run_layouts};
use sink::CliSink;

/// Top-level CLI for apkfetch.
#[derive(Debug, Parser)]
#[command(name = "apkfetch")]
#[command(about = "apkfetch: download APKs and record SHA-256 checksums", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download an APK, compute its SHA-256 and print the JSON report.
    Fetch(FetchArgs),

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Fail unless the file hashes to this SHA-256.
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,
    },

    /// Hash every file under a decompiled output directory.
    Layouts {
        /// Directory to hash (e.g. the `res` directory of a decoded APK).
        dir: PathBuf,

        /// Merge the result into this report file (created if missing).
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Direct HTTP/HTTPS URL of the APK.
    pub url: String,

    /// Directory to save into (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Local file name (default: last path segment of the URL).
    #[arg(long, value_name = "FILE")]
    pub name: Option<String>,

    /// Package name recorded in the report (default: file name without extension).
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Fail unless the download hashes to this SHA-256.
    #[arg(long, value_name = "HEX")]
    pub expect_sha256: Option<String>,

    /// Overall deadline in seconds; overrides `timeout_secs` from config.toml.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also write the JSON report to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl CliCommand {
    pub fn run_from_args(log_target: &LogTarget) -> Result<()> {
        let cli = Cli::parse();
        let sink = CliSink::for_target(log_target);

        match cli.command {
            CliCommand::Fetch(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, args, &sink)?;
            }
            CliCommand::Checksum { path, expect } => run_checksum(&path, expect.as_deref())?,
            CliCommand::Layouts { dir, report } => run_layouts(&dir, report.as_deref(), &sink)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
