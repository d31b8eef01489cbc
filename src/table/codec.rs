use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::{is_quoted, Row, RowTable, TableError};

/// Reads and writes row tables with a fixed number of preamble lines.
///
/// Fields are split on tabs only; quotes are never interpreted, so every
/// token round-trips byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowTableCodec {
    preamble_lines: usize,
}

impl RowTableCodec {
    /// Codec for tables with `preamble_lines` lines before the column header
    pub const fn new(preamble_lines: usize) -> Self {
        Self { preamble_lines }
    }

    /// Number of preamble lines this codec expects
    pub fn preamble_lines(&self) -> usize {
        self.preamble_lines
    }

    /// Read a table from a file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<RowTable, TableError> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Read a table from a buffered reader.
    ///
    /// A file without a column header yields an empty table with no columns.
    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<RowTable, TableError> {
        let mut preamble = Vec::with_capacity(self.preamble_lines);
        for found in 0..self.preamble_lines {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Err(TableError::TruncatedHeader {
                    expected: self.preamble_lines,
                    found,
                });
            }
            preamble.push(trim_line_end(&line).to_string());
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let mut table = RowTable {
            preamble,
            quoted_labels: true,
            ..Default::default()
        };

        let Some(header) = records.next().transpose()? else {
            return Ok(table);
        };
        let header: Vec<String> = header.iter().map(str::to_string).collect();
        let line_offset = self.preamble_lines as u64;

        for record in records {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0) + line_offset;

            if table.rows.is_empty() {
                // The first row decides whether the header names the label column.
                if record.len() == header.len() && !header.is_empty() {
                    table.index_label = Some(header[0].clone());
                    table.columns = header[1..].to_vec();
                } else {
                    table.columns = header.clone();
                }
            }

            let expected = table.columns.len() + 1;
            if record.len() != expected {
                return Err(TableError::RaggedRow {
                    line,
                    expected,
                    found: record.len(),
                });
            }

            let mut fields = record.iter();
            let label = fields.next().unwrap_or_default().to_string();
            if table.rows.is_empty() {
                table.quoted_labels = is_quoted(&label);
            }
            table.rows.push(Row {
                label,
                values: fields.map(str::to_string).collect(),
            });
        }

        if table.rows.is_empty() {
            table.columns = header;
        }

        Ok(table)
    }

    /// Write a table to a file, replacing any existing content.
    pub fn write_path<P: AsRef<Path>>(&self, table: &RowTable, path: P) -> Result<(), TableError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a table: preamble lines verbatim, then header and rows tab-separated.
    pub fn write<W: Write>(&self, table: &RowTable, writer: &mut W) -> Result<(), TableError> {
        for line in &table.preamble {
            writeln!(writer, "{}", line)?;
        }

        if table.columns.is_empty() && table.index_label.is_none() && table.rows.is_empty() {
            return Ok(());
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let header = table.index_label.iter().chain(table.columns.iter());
        csv_writer.write_record(header)?;

        for row in &table.rows {
            csv_writer.write_record(std::iter::once(&row.label).chain(row.values.iter()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn trim_line_end(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
