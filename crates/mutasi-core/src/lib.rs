//! Core library for Indonesian bank e-statement conversion.
//!
//! This crate provides:
//! - PDF text extraction and whitespace-grid table reconstruction
//! - Per-issuer statement normalization (BCA, BNI, Mandiri, BRI)
//! - Inflow/outflow classification and date reconstruction
//! - Styled spreadsheet and delimited-text export

pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{MutasiError, Result};
pub use export::{serialize, suggested_filename, OutputDocument};
pub use models::{
    Bank, ConvertConfig, ExportFormat, NormalizedStatement, RawPage, RawTable, StatementMetadata,
    TransactionRecord,
};
pub use pdf::{DocumentExtractor, PdfExtractor};
pub use statement::{convert_document, StatementConverter};

/// Convert raw PDF bytes straight to an output file.
///
/// The one fallible step is reading the PDF itself; past that point
/// every failure is contained inside the returned document.
pub fn convert_bytes(
    data: &[u8],
    bank: Bank,
    format: ExportFormat,
    config: &ConvertConfig,
) -> Result<OutputDocument> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    let pages = extractor.extract_pages()?;
    Ok(convert_document(&pages, bank, format, config))
}
