//! Typed row identifiers.
//!
//! Spectra, samples and chromatographic peaks are identified by their 1-based
//! position inside one experiment directory. These newtypes keep the three
//! index spaces apart; the textual row label (`"7"`, `"CP7"`) is only produced
//! when a table is serialized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schema::CHROM_PEAK_LABEL_PREFIX;

/// A 1-based identifier of one row in an experiment table.
pub trait RowId: Copy + Eq + Ord + fmt::Display {
    /// Prefix of the textual row label
    const LABEL_PREFIX: &'static str;

    /// Build an identifier from its 1-based position.
    fn from_position(position: usize) -> Self;

    /// The 1-based position of the row.
    fn position(self) -> usize;

    /// The identifier following the first `offset` rows, i.e. position `offset + 1`.
    fn after(offset: usize) -> Self {
        Self::from_position(offset + 1)
    }

    /// Row label without quotes (`"7"` or `"CP7"`).
    fn label(self) -> String {
        format!("{}{}", Self::LABEL_PREFIX, self.position())
    }
}

/// Error returned when a row label or index value cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{value}'")]
pub struct ParseIdError {
    kind: &'static str,
    value: String,
}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create an identifier from its 1-based position.
            ///
            /// Returns `None` for position 0.
            pub fn new(position: usize) -> Option<Self> {
                (position > 0).then_some(Self(position))
            }

            /// Shift the identifier past `offset` preceding rows.
            pub fn offset(self, offset: usize) -> Self {
                Self(self.0 + offset)
            }
        }

        impl RowId for $name {
            const LABEL_PREFIX: &'static str = $prefix;

            fn from_position(position: usize) -> Self {
                debug_assert!(position > 0, "row positions are 1-based");
                Self(position)
            }

            fn position(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            /// Parses a label or value such as `2`, `"2"`, `CP2` or `"CP2"`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let error = || ParseIdError {
                    kind: $kind,
                    value: s.to_string(),
                };
                let bare = crate::table::unquote(s.trim());
                let digits = bare.strip_prefix(Self::LABEL_PREFIX).unwrap_or(bare);
                let position: usize = digits.parse().map_err(|_| error())?;
                Self::new(position).ok_or_else(error)
            }
        }
    };
}

row_id!(
    /// Position of a spectrum in `ms_backend_data.txt`
    SpectrumIndex,
    "",
    "spectrum index"
);

row_id!(
    /// Position of a sample in `ms_experiment_sample_data.txt`
    SampleIndex,
    "",
    "sample index"
);

row_id!(
    /// Position of a chromatographic peak in `xcms_experiment_chrom_peaks.txt`
    PeakIndex,
    CHROM_PEAK_LABEL_PREFIX,
    "peak index"
);
