//! # Reference Spectra
//!
//! Downloads the MassBank spectral library used as the reference side of
//! spectral matching. The library is the `MassBank_NIST.msp` asset of the
//! latest MassBank-data release and lands in a new directory:
//!
//! ```text
//! massbank/
//! └── MassBank_NIST.msp
//! ```

mod error;


use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tempfile::NamedTempFile;

pub use error::DatabaseError;

/// Latest release of the MassBank library in MSP format
pub const MASSBANK_URL: &str =
    "https://github.com/MassBank/MassBank-data/releases/latest/download/MassBank_NIST.msp";

/// File name of the downloaded library
pub const MASSBANK_FILE: &str = "MassBank_NIST.msp";

/// Downloads the MassBank library over HTTP.
#[derive(Debug, Clone)]
pub struct MassBankFetcher {
    client: Client,
    url: String,
}

impl MassBankFetcher {
    /// Fetcher for [`MASSBANK_URL`] with the system proxy settings.
    pub fn new() -> Result<Self, DatabaseError> {
        let client = Client::builder()
            .user_agent(concat!("xcms-experiment/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, MASSBANK_URL))
    }

    /// Fetcher using `client` to download `url`.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Download from `url` instead.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Source URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the library into a new directory at `output`.
    ///
    /// Returns the path of the written file. Nothing is created when the
    /// server does not answer with 200.
    pub fn fetch<P: AsRef<Path>>(&self, output: P) -> Result<PathBuf, DatabaseError> {
        let output = output.as_ref();
        check_output(output)?;

        info!("Downloading {}", self.url);
        let mut response = self.client.get(&self.url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(DatabaseError::Status(status.as_u16()));
        }

        fs::create_dir_all(output)?;
        let staged = NamedTempFile::new_in(output)?;
        let bytes = {
            let mut writer = BufWriter::new(staged.as_file());
            let bytes = response.copy_to(&mut writer)?;
            writer.flush()?;
            bytes
        };
        let path = output.join(MASSBANK_FILE);
        staged.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", bytes, path.display());
        Ok(path)
    }
}

/// Download the latest MassBank library into a new directory at `output`.
pub fn fetch_massbank<P: AsRef<Path>>(output: P) -> Result<PathBuf, DatabaseError> {
    MassBankFetcher::new()?.fetch(output)
}

fn check_output(output: &Path) -> Result<(), DatabaseError> {
    if !output.exists() {
        return Ok(());
    }
    if !output.is_dir() {
        return Err(DatabaseError::NotADirectory(output.to_path_buf()));
    }
    if fs::read_dir(output)?.next().is_some() {
        return Err(DatabaseError::AlreadyExists(output.to_path_buf()));
    }
    Ok(())
}
