use anyhow::{Context, Result};
use std::path::PathBuf;

use xcms_experiment::database::MassBankFetcher;

/// Download the MassBank library
pub fn fetch(output: PathBuf, url: Option<String>) -> Result<()> {
    let mut fetcher = MassBankFetcher::new().context("Failed to set up the HTTP client")?;
    if let Some(url) = url {
        fetcher = fetcher.with_url(url);
    }
    let path = fetcher
        .fetch(&output)
        .with_context(|| format!("Failed to fetch {}", fetcher.url()))?;
    println!("{}", path.display());
    Ok(())
}
