/// Errors that can occur while reading or writing a row table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading or writing the table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Tab-separated parsing error
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The file ended before the expected preamble lines
    #[error("Expected {expected} header line(s) but the file has only {found}")]
    TruncatedHeader {
        /// Number of preamble lines the format requires
        expected: usize,
        /// Number of lines found
        found: usize,
    },

    /// A data row has the wrong number of fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// 1-based line number in the file
        line: u64,
        /// Expected number of fields (label included)
        expected: usize,
        /// Number of fields found
        found: usize,
    },

    /// A cell does not hold the expected kind of value
    #[error("Line {line}: invalid value '{value}' in column {column}")]
    InvalidValue {
        /// 1-based line number in the file
        line: u64,
        /// Column name or position
        column: String,
        /// Offending raw value
        value: String,
    },
}
