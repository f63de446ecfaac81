//! `cspend search <query>` – download every result page.

use anyhow::{Context, Result};
use cspend_core::config::CspendConfig;
use cspend_core::params::{ParamValue, SearchParams};
use cspend_core::record::DownloadRecord;
use cspend_core::Downloader;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SearchArgs {
    pub query: String,
    pub dir: PathBuf,
    pub prefix: Option<String>,
    pub key: String,
    pub params: Vec<(String, ParamValue)>,
    pub base_url: Option<String>,
    pub json: bool,
}

impl SearchArgs {
    /// Query text under `key`, followed by the extra params in order.
    pub fn search_params(&self) -> SearchParams {
        let mut params = SearchParams::new().with(self.key.clone(), self.query.clone());
        for (k, v) in &self.params {
            params.set(k.clone(), v.clone());
        }
        params
    }
}

fn print_records(records: &[DownloadRecord]) {
    println!("   Page  Status            File / message");
    println!("  -----  ----------------  --------------");
    for r in records {
        let detail = match &r.filename {
            Some(path) => path.display().to_string(),
            None => r.message.clone(),
        };
        println!("  {:>5}  {:<16}  {}", r.page, r.status, detail);
    }
}

pub fn run_search(cfg: &CspendConfig, args: SearchArgs) -> Result<()> {
    let params = args.search_params();
    let mut downloader = Downloader::from_config(cfg, &args.dir).file_prefix(args.prefix.clone());
    if let Some(url) = &args.base_url {
        downloader = downloader.base_url(url.clone());
    }

    tracing::info!(query = %args.query, dir = %args.dir.display(), "search");
    match downloader.download_all(&params) {
        Ok(run) => {
            if args.json {
                let out = serde_json::to_string_pretty(&run).context("serialize run")?;
                println!("{}", out);
            } else {
                print_records(&run.records);
                println!(
                    "Saved {} page(s) to {}; stopped: {}",
                    run.saved_files().len(),
                    args.dir.display(),
                    run.stop
                );
            }
            Ok(())
        }
        Err(failure) => {
            if args.json {
                let out =
                    serde_json::to_string_pretty(&failure.records).context("serialize records")?;
                println!("{}", out);
            } else {
                print_records(&failure.records);
            }
            Err(failure).context("search aborted")
        }
    }
}
