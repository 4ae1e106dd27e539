// Common error types for sitekit

use std::path::Path;

/// Errors raised by the sitekit helpers
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Filesystem operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied a malformed argument; raised before any I/O
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport failure or unexpected response status
    #[error("Network error: {0}")]
    Network(String),

    /// Archive could not be decompressed or unpacked
    #[error("Archive error: {0}")]
    Archive(String),

    /// Dependency manifest could not be parsed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Optional configuration field has the wrong type
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration file is unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Glob pattern is malformed or a match could not be read
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// External package manager command failed
    #[error("Command error: {0}")]
    Command(String),
}

impl SiteError {
    /// Wrap an I/O error with the path it happened on
    pub fn io_at(path: &Path, err: std::io::Error) -> Self {
        SiteError::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.display(), err),
        ))
    }
}

impl From<reqwest::Error> for SiteError {
    fn from(err: reqwest::Error) -> Self {
        SiteError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Manifest(err.to_string())
    }
}

impl From<glob::PatternError> for SiteError {
    fn from(err: glob::PatternError) -> Self {
        SiteError::Pattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

/// Error presentation for the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub exit_code: i32,
}

impl UserError {
    /// Map a library error to a message and process exit code
    pub fn from_site_error(err: &SiteError) -> Self {
        let exit_code = match err {
            SiteError::InvalidInput(_) | SiteError::Validation(_) | SiteError::Config(_) => 2,
            SiteError::Network(_) => 3,
            _ => 1,
        };

        Self {
            message: err.to_string(),
            exit_code,
        }
    }

    /// Print the error to stderr
    pub fn print(&self) {
        eprintln!("error: {}", self.message);
    }
}
