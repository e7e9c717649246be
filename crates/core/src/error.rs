//! Error types for presentation outline extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during outline extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// A single shape could not be processed. Recovered per shape:
    /// the slide assembler logs a warning and moves on.
    #[error("Shape processing error: {0}")]
    Shape(String),

    /// ZIP archive error (PPTX container).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error (PPTX parts).
    #[error("XML parsing error: {0}")]
    Xml(String),
}
