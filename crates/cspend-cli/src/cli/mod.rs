//! CLI for cspend.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cspend_core::config;
use cspend_core::params::ParamValue;
use std::path::PathBuf;

use commands::{run_config, run_filename, run_search, SearchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cspend")]
#[command(about = "Download procurement-contract search results page by page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Search contracts and save every result page as JSON.
    Search {
        /// Free-text query.
        query: String,

        /// Output directory (created with parents if missing).
        #[arg(long, short = 'd', default_value = "downloads")]
        dir: PathBuf,

        /// Prefix for page file names (`<prefix>_page_<n>.json`).
        #[arg(long, short = 'p')]
        prefix: Option<String>,

        /// Query parameter the search text is sent under.
        #[arg(long, default_value = "productsearchlist")]
        key: String,

        /// Extra search parameter, repeatable.
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, ParamValue)>,

        /// Override the configured search endpoint.
        #[arg(long)]
        base_url: Option<String>,

        /// Print the download records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the file name a page would be saved under.
    Filename {
        /// Page number (1-based).
        page: u32,

        #[arg(long, short = 'p')]
        prefix: Option<String>,
    },

    /// Show the config file location and effective settings.
    Config,
}

fn parse_param(s: &str) -> std::result::Result<(String, ParamValue), String> {
    cspend_core::SearchParams::parse_pair(s)
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Search {
                query,
                dir,
                prefix,
                key,
                params,
                base_url,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_search(
                    &cfg,
                    SearchArgs {
                        query,
                        dir,
                        prefix,
                        key,
                        params,
                        base_url,
                        json,
                    },
                )?;
            }
            CliCommand::Filename { page, prefix } => run_filename(prefix.as_deref(), page),
            CliCommand::Config => run_config()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
