//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::RawPage;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for document extraction implementations.
///
/// The pipeline consumes extracted pages only; alternative back ends
/// (an OCR path, a remote extraction service) plug in here.
pub trait DocumentExtractor {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document.
    fn page_count(&self) -> u32;

    /// Extract text from the entire document.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract every page with its reconstructed tables, in order.
    fn extract_pages(&self) -> Result<Vec<RawPage>>;
}
