use std::fmt::Write as _;

/// Validates that `found` lists exactly the `expected` columns, in order.
///
/// Column names are compared after removing the literal quotes the backend
/// writes around them.
pub fn validate_columns_exact<S: AsRef<str>>(
    file: &str,
    expected: &[&str],
    found: &[S],
) -> Result<(), SchemaValidationError> {
    let matches = expected.len() == found.len()
        && expected
            .iter()
            .zip(found)
            .all(|(e, f)| *e == crate::table::unquote(f.as_ref()));

    if matches {
        Ok(())
    } else {
        Err(SchemaValidationError::HeaderMismatch {
            file: file.to_string(),
            requirement: "consist of the following columns",
            expected: expected.join(", "),
            found: join_unquoted(found),
        })
    }
}

/// Validates that `found` contains at least the `expected` columns, in any order.
pub fn validate_columns_superset<S: AsRef<str>>(
    file: &str,
    expected: &[&str],
    found: &[S],
) -> Result<(), SchemaValidationError> {
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|e| !found.iter().any(|f| crate::table::unquote(f.as_ref()) == *e))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(SchemaValidationError::HeaderMismatch {
        file: file.to_string(),
        requirement: "at least consist of the following columns",
        expected: expected.join(", "),
        found: join_unquoted(found),
    })
}

fn join_unquoted<S: AsRef<str>>(columns: &[S]) -> String {
    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", crate::table::unquote(column.as_ref()));
    }
    out
}

/// Errors that can occur during header validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// The column header does not satisfy the file's requirement
    #[error("Header does not match {file}. It must {requirement}:\n{expected}\n\nFound instead:\n{found}")]
    HeaderMismatch {
        /// File whose header was checked
        file: String,
        /// Human readable requirement ("consist of the following columns", ...)
        requirement: &'static str,
        /// Expected column names
        expected: String,
        /// Column names found in the file
        found: String,
    },
}
