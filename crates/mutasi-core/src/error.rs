//! Error types for the mutasi-core library.

use thiserror::Error;

/// Main error type for the mutasi library.
#[derive(Error, Debug)]
pub enum MutasiError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement normalization error.
    #[error("statement error: {0}")]
    Statement(#[from] StatementError),

    /// Output serialization error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to statement normalization.
///
/// These are terminal for one conversion request but are reported back
/// as a diagnostic document, never surfaced to the caller as a failure
/// of the transport (see `export::diagnostic`).
#[derive(Error, Debug)]
pub enum StatementError {
    /// Extraction returned zero tables for the document.
    #[error("No table data found.")]
    NoTables,

    /// Tables were found but no row survived normalization.
    #[error("No valid data found.")]
    NoRows,
}

/// Errors related to output serialization.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The spreadsheet writer failed.
    #[error("spreadsheet write failed: {0}")]
    Spreadsheet(String),

    /// The delimited-text writer failed.
    #[error("delimited write failed: {0}")]
    Delimited(String),
}

/// Result type for the mutasi library.
pub type Result<T> = std::result::Result<T, MutasiError>;
