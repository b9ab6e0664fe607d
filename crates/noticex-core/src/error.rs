//! Error types for the noticex-core library.
//!
//! Field extraction itself never fails: an unrecoverable field is an empty
//! string and a suspicious one is a diagnostic. Errors here belong to the
//! surrounding concerns (text acquisition, configuration, I/O).

use thiserror::Error;

/// Main error type for the noticex library.
#[derive(Error, Debug)]
pub enum NoticexError {
    /// Text acquisition error.
    #[error("acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while recovering text from a document.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract embedded text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// No text could be recovered from the document at all.
    #[error("no text could be extracted from the document")]
    NoText,

    /// File type the acquisition layer cannot read.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the noticex library.
pub type Result<T> = std::result::Result<T, NoticexError>;
