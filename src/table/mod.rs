//! # Row Tables
//!
//! In-memory representation of the tab-separated tables of an experiment
//! directory and the codec that reads and writes them.
//!
//! ## Text Format
//!
//! ```text
//! # MsBackendMzR                   <- preamble (0 or more lines, kept verbatim)
//! "msLevel"	"rtime"	...          <- column header, N tokens
//! "1"	1	0.275	...               <- label + N values
//! ```
//!
//! No quote processing takes place: the backend writes literal double quotes
//! around column names and row labels, and those bytes are preserved as they
//! are. Use [`unquote`] to compare names and [`requote_like`] to write a new
//! value in the quoting style of the one it replaces.

mod codec;
mod error;
mod links;

#[cfg(test)]
mod tests;

pub use codec::RowTableCodec;
pub use error::TableError;
pub use links::{LinksTable, SpectrumLink};

use crate::ids::RowId;

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// Whether the token is wrapped in double quotes.
pub fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// Format `value` with the same quoting as `original`.
pub fn requote_like(original: &str, value: &str) -> String {
    if is_quoted(original) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// One data row: its label and its values, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Raw row label as it appears in the file (e.g. `"CP3"`)
    pub label: String,
    /// Raw cell values
    pub values: Vec<String>,
}

/// A parsed row table with its header lines preserved
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowTable {
    /// Lines before the column header, without line terminators
    pub preamble: Vec<String>,
    /// Name of the label column, when the header names it
    pub index_label: Option<String>,
    /// Raw column header tokens
    pub columns: Vec<String>,
    /// Data rows
    pub rows: Vec<Row>,
    /// Whether labels are written in double quotes
    pub quoted_labels: bool,
}

impl RowTable {
    /// Create an empty table with the given raw column tokens.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            quoted_labels: true,
            ..Default::default()
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names with their quotes removed
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| unquote(c)).collect()
    }

    /// Position of the column called `name` (compared unquoted)
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| unquote(c) == name)
    }

    /// Raw values of the column called `name`
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let position = self.column_position(name)?;
        Some(self.rows.iter().map(move |row| row.values[position].as_str()))
    }

    /// Append a row.
    pub fn push_row(&mut self, label: impl Into<String>, values: Vec<String>) {
        self.rows.push(Row {
            label: label.into(),
            values,
        });
    }

    /// A copy of this table's header lines without any data rows.
    pub fn header_only(&self) -> Self {
        Self {
            preamble: self.preamble.clone(),
            index_label: self.index_label.clone(),
            columns: self.columns.clone(),
            rows: Vec::new(),
            quoted_labels: self.quoted_labels,
        }
    }

    /// Relabel rows with consecutive identifiers starting at `first`.
    pub fn relabel<I: RowId>(&mut self, first: I) {
        let start = first.position();
        let quoted = self.quoted_labels;
        for (i, row) in self.rows.iter_mut().enumerate() {
            let label = I::from_position(start + i).label();
            row.label = if quoted { format!("\"{}\"", label) } else { label };
        }
    }

    /// Rewrite every value of the column called `name`.
    ///
    /// Returns `Ok(false)` without touching the table when the column does not exist.
    pub fn map_column<E, F>(&mut self, name: &str, mut f: F) -> Result<bool, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let Some(position) = self.column_position(name) else {
            return Ok(false);
        };
        for row in &mut self.rows {
            let value = f(&row.values[position])?;
            row.values[position] = value;
        }
        Ok(true)
    }

    /// Move all rows of `other` to the end of this table.
    pub fn append(&mut self, other: RowTable) {
        self.rows.extend(other.rows);
    }
}
