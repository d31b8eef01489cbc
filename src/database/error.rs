use std::path::PathBuf;

/// Errors that can occur while downloading a reference database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// I/O error writing the download
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a status other than 200
    #[error("Failed to download file. Code: {0}")]
    Status(u16),

    /// A non-empty directory already exists at the output location
    #[error("Output directory already exists and is not empty: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The output path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
