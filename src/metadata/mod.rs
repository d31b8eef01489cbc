//! # Spectral Metadata Export
//!
//! Flattens an experiment into one table with a row per spectrum and sample link, suitable
//! for plotting chromatograms or joining with other sample metadata:
//!
//! ```text
//! id  msLevel  rtime  ...  sample_id  sample_name  sample_group  [rtime_adjusted-rtime]
//! ```
//!
//! - every backend column, values unquoted and `NA` written as an empty cell
//! - `sample_id`: the sample the spectrum is linked to; a spectrum linked to
//!   several samples gets one row each, an unlinked one an empty cell
//! - every sample-data column except `spectraOrigin`
//! - the alignment shift, when the experiment carries adjusted retention times

mod error;
mod export;


pub use error::MetadataError;
pub use export::{spectral_metadata, SpectralMetadata};
