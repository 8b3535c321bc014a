//! CLI for the Unaffiliate link cleaner.

mod commands;
mod message_host;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use unaffiliate_core::background::Background;
use unaffiliate_core::config;
use unaffiliate_core::stats::StatsStore;

use commands::{
    run_check, run_clean, run_click, run_completions, run_man, run_messages, run_scan, run_stats,
    ScanOptions,
};

/// Top-level CLI for Unaffiliate.
#[derive(Debug, Parser)]
#[command(name = "unaffiliate")]
#[command(about = "Unaffiliate: strip affiliate tags from Amazon links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clean URLs and print the result, one per line. Reads stdin when no URL is given.
    Clean {
        /// URLs to clean.
        urls: Vec<String>,
    },

    /// Show whether a URL is a marketplace, shortener or other link.
    Check {
        /// URL to classify.
        url: String,
    },

    /// Clean the links of an HTML document.
    Scan {
        /// HTML file to scan.
        path: PathBuf,
        /// Write the result here instead of stdout.
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,
        /// Rewrite the file itself.
        #[arg(long)]
        in_place: bool,
        /// Keep re-scanning the file on a timer until interrupted.
        #[arg(long, requires = "in_place")]
        watch: bool,
        /// Re-scan period for --watch (default from config).
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Show what a click on a link would do.
    Click {
        /// The link's href.
        href: String,
    },

    /// Show cleaned-link counters.
    Stats {
        /// Start a new page: zero the per-page counter.
        #[arg(long)]
        reset_page: bool,
        /// Page URL to report the marketplace status for.
        #[arg(long)]
        url: Option<String>,
    },

    /// Answer JSON requests from stdin, one per line, on stdout.
    Messages,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell, Cli::command()),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let stats = StatsStore::open_default()?;
        let mut bg = Background::from_config(&cfg, stats);

        match cli.command {
            CliCommand::Clean { urls } => run_clean(&mut bg, &urls).await?,
            CliCommand::Check { url } => run_check(&bg, &url),
            CliCommand::Scan {
                path,
                output,
                in_place,
                watch,
                interval_ms,
            } => {
                let opts = ScanOptions {
                    path,
                    output,
                    in_place,
                    watch,
                    interval_ms: interval_ms.unwrap_or(cfg.scan_interval_ms),
                };
                run_scan(&mut bg, &opts).await?;
            }
            CliCommand::Click { href } => run_click(&mut bg, &href),
            CliCommand::Stats { reset_page, url } => run_stats(&mut bg, reset_page, url.as_deref()),
            CliCommand::Messages => run_messages(&mut bg).await?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
