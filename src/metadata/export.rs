use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::experiment::ExperimentDir;
use crate::ids::RowId;
use crate::schema::{ID, MS_LEVEL, RTIME, RTIME_ADJUSTED, RTIME_SHIFT, SAMPLE_ID, SPECTRA_ORIGIN};
use crate::table::{unquote, RowTable};

use super::MetadataError;

/// Per-spectrum metadata table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralMetadata {
    /// Column names, `id` excluded
    pub columns: Vec<String>,
    /// Spectrum ids and their values; a spectrum linked to several samples has several rows
    pub rows: Vec<(String, Vec<String>)>,
}

impl SpectralMetadata {
    /// Number of rows, one per spectrum and sample link
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no spectrum is left
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let position = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|(_, v)| v[position].as_str()).collect())
    }

    /// Write the table as TSV with an `id` column first.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), MetadataError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(std::iter::once(ID).chain(self.columns.iter().map(String::as_str)))?;
        for (id, values) in &self.rows {
            csv_writer.write_record(std::iter::once(id).chain(values.iter()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to a TSV file.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), MetadataError> {
        let file = File::create(path)?;
        self.write_tsv(BufWriter::new(file))
    }
}

/// Join the spectra of an experiment with their samples.
///
/// Each link yields one row, so a spectrum shared by several samples appears
/// once per sample. With `ms_level` set, only spectra of that MS level are kept.
pub fn spectral_metadata(
    experiment: &ExperimentDir,
    ms_level: Option<u8>,
) -> Result<SpectralMetadata, MetadataError> {
    let backend = experiment.backend_data()?;
    let samples = experiment.sample_data()?;
    let links = experiment.links()?;

    let mut samples_of: HashMap<usize, Vec<usize>> = HashMap::new();
    for link in links.iter() {
        samples_of
            .entry(link.spectrum.position())
            .or_default()
            .push(link.sample.position());
    }

    let sample_columns: Vec<usize> = samples
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| unquote(c) != SPECTRA_ORIGIN)
        .map(|(i, _)| i)
        .collect();

    let level_position = backend
        .column_position(MS_LEVEL)
        .ok_or(MetadataError::MissingColumn(MS_LEVEL))?;
    let shift = match (
        backend.column_position(RTIME),
        backend.column_position(RTIME_ADJUSTED),
    ) {
        (Some(rtime), Some(adjusted)) => Some((rtime, adjusted)),
        _ => None,
    };

    let mut columns: Vec<String> = backend.column_names().into_iter().map(str::to_string).collect();
    columns.push(SAMPLE_ID.to_string());
    columns.extend(sample_columns.iter().map(|&i| unquote(&samples.columns[i]).to_string()));
    if shift.is_some() {
        columns.push(RTIME_SHIFT.to_string());
    }

    let mut rows = Vec::with_capacity(backend.len());
    for (i, row) in backend.rows.iter().enumerate() {
        let id = unquote(&row.label).to_string();
        if let Some(level) = ms_level {
            let value = cell(&row.values[level_position]);
            let found: u8 = value.parse().map_err(|_| MetadataError::InvalidNumber {
                spectrum: id.clone(),
                column: MS_LEVEL,
                value: value.to_string(),
            })?;
            if found != level {
                continue;
            }
        }

        let spectrum: Vec<String> = row.values.iter().map(|v| cell(v).to_string()).collect();
        let shift_value =
            shift.map(|(rtime, adjusted)| rtime_shift(&row.values[rtime], &row.values[adjusted]));
        let linked = samples_of.get(&(i + 1)).map(Vec::as_slice).unwrap_or(&[]);

        // One row per link; unlinked spectra keep a row with empty sample fields
        let sample_fields: Vec<Vec<String>> = if linked.is_empty() {
            vec![vec![String::new(); sample_columns.len() + 1]]
        } else {
            linked
                .iter()
                .map(|&sample| {
                    let mut fields = vec![sample.to_string()];
                    fields.extend(sample_values(&samples, sample, &sample_columns));
                    fields
                })
                .collect()
        };
        for fields in sample_fields {
            let mut values = spectrum.clone();
            values.extend(fields);
            values.extend(shift_value.clone());
            rows.push((id.clone(), values));
        }
    }

    debug!(
        "Exported {} metadata rows for {} spectra from {}",
        rows.len(),
        backend.len(),
        experiment
    );
    Ok(SpectralMetadata { columns, rows })
}

/// Unquoted cell value, with `NA` as empty.
fn cell(value: &str) -> &str {
    match unquote(value) {
        "NA" => "",
        bare => bare,
    }
}

fn sample_values(samples: &RowTable, sample: usize, columns: &[usize]) -> Vec<String> {
    match samples.rows.get(sample - 1) {
        Some(row) => columns.iter().map(|&i| cell(&row.values[i]).to_string()).collect(),
        None => vec![String::new(); columns.len()],
    }
}

/// `rtime_adjusted - rtime`, empty when either is missing.
fn rtime_shift(rtime: &str, adjusted: &str) -> String {
    match (cell(rtime).parse::<f64>(), cell(adjusted).parse::<f64>()) {
        (Ok(rtime), Ok(adjusted)) => (adjusted - rtime).to_string(),
        _ => String::new(),
    }
}
