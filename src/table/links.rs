use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::ids::{RowId, SampleIndex, SpectrumIndex};

use super::TableError;

/// One entry of the sample-to-spectrum join table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpectrumLink {
    /// Sample the spectrum belongs to
    pub sample: SampleIndex,
    /// Linked spectrum
    pub spectrum: SpectrumIndex,
}

/// The headerless two-column `(sample, spectrum)` table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinksTable {
    links: Vec<SpectrumLink>,
}

impl LinksTable {
    /// Create a table from links
    pub fn new(links: Vec<SpectrumLink>) -> Self {
        Self { links }
    }

    /// Read the table from a file.
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read the table from a reader. Values may be bare or double-quoted integers.
    pub fn read<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut links = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != 2 {
                return Err(TableError::RaggedRow {
                    line,
                    expected: 2,
                    found: record.len(),
                });
            }
            let invalid = |column: &str, value: &str| TableError::InvalidValue {
                line,
                column: column.to_string(),
                value: value.to_string(),
            };
            let sample = record[0]
                .parse::<SampleIndex>()
                .map_err(|_| invalid("1", &record[0]))?;
            let spectrum = record[1]
                .parse::<SpectrumIndex>()
                .map_err(|_| invalid("2", &record[1]))?;
            links.push(SpectrumLink { sample, spectrum });
        }

        Ok(Self { links })
    }

    /// Write the table to a file as plain integers, without a header.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the table as plain integers, without a header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), TableError> {
        for link in &self.links {
            writeln!(writer, "{}\t{}", link.sample.position(), link.spectrum.position())?;
        }
        Ok(())
    }

    /// Shift every link past `samples` preceding samples and `spectra` preceding spectra.
    pub fn offset(mut self, samples: usize, spectra: usize) -> Self {
        for link in &mut self.links {
            link.sample = link.sample.offset(samples);
            link.spectrum = link.spectrum.offset(spectra);
        }
        self
    }

    /// Move all links of `other` to the end of this table.
    pub fn append(&mut self, other: LinksTable) {
        self.links.extend(other.links);
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when the table holds no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate over the links in file order
    pub fn iter(&self) -> std::slice::Iter<'_, SpectrumLink> {
        self.links.iter()
    }
}

impl<'a> IntoIterator for &'a LinksTable {
    type Item = &'a SpectrumLink;
    type IntoIter = std::slice::Iter<'a, SpectrumLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
