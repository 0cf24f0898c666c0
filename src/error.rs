//! Error types for report generation.

use std::io;
use thiserror::Error;

/// Result type alias for report generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or exporting a report.
///
/// Any error aborts the report it belongs to: no partial document is ever
/// rendered or written to disk.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing an exported report file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF backend rejected the document.
    #[error("PDF backend error: {0}")]
    Pdf(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing directory");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn pdf_error_display() {
        let err = Error::Pdf("font unavailable".to_string());
        assert_eq!(err.to_string(), "PDF backend error: font unavailable");
    }
}
