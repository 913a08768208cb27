//! PDF text extraction and table reconstruction using lopdf and
//! pdf-extract.
//!
//! Statement PDFs lay tables out with fixed-width whitespace gaps, so
//! a grid can be rebuilt from plain page text: runs of two or more
//! spaces delimit cells, and consecutive multi-cell lines form one
//! table.

use lopdf::Document;
use tracing::{debug, trace};

use super::{DocumentExtractor, Result};
use crate::error::PdfError;
use crate::models::{RawPage, RawTable};

/// Minimum cells per line for it to count as tabular.
const MIN_TABLE_CELLS: usize = 2;

/// Minimum consecutive tabular lines to form a table.
const MIN_TABLE_ROWS: usize = 2;

/// Document extractor backed by lopdf, with pdf-extract supplying the
/// whole-document text layer.
#[derive(Default)]
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }
}

impl DocumentExtractor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| PdfError::Parse(format!("failed to parse PDF: {e}")))?;

        if doc.is_encrypted() {
            // Statement PDFs are often sealed with an empty owner
            // password; anything stronger is rejected.
            doc.decrypt("")
                .map_err(|_| PdfError::Encrypted)?;
        }

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!(pages = doc.get_pages().len(), "PDF loaded");
        self.document = Some(doc);
        self.raw_data = data.to_vec();
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|d| d.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;
        // pdf-extract keeps the page layout better than lopdf's own
        // text operator walk, which matters for table reconstruction.
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_pages(&self) -> Result<Vec<RawPage>> {
        let count = self.page_count();
        if count == 0 {
            return Err(PdfError::NoPages);
        }
        let mut pages = Vec::with_capacity(count as usize);
        for number in 1..=count {
            let text = self.extract_page_text(number).unwrap_or_default();
            let tables = reconstruct_tables(&text);
            trace!(page = number, tables = tables.len(), "page extracted");
            pages.push(RawPage { number, text, tables });
        }

        // Some generators defeat lopdf's operator walk entirely; the
        // pdf-extract layer handles more of them. When no page yielded
        // text, hang the whole-document text off the first page so the
        // banner and tables can still be recovered.
        if pages.iter().all(|p| p.text.trim().is_empty()) {
            if let Ok(text) = self.extract_text() {
                debug!(bytes = text.len(), "per-page text empty, using document text layer");
                pages[0].tables = reconstruct_tables(&text);
                pages[0].text = text;
            }
        }
        Ok(pages)
    }
}

/// Split a text line into cells on runs of two or more spaces.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0usize;
    for ch in line.chars() {
        if ch == ' ' {
            spaces += 1;
            continue;
        }
        if spaces >= 2 && !current.is_empty() {
            cells.push(std::mem::take(&mut current));
        } else if spaces > 0 && !current.is_empty() {
            current.push(' ');
        }
        spaces = 0;
        current.push(ch);
    }
    if !current.is_empty() {
        cells.push(current);
    }
    cells
}

/// Rebuild cell grids from page text: consecutive lines that split
/// into at least two cells are grouped into one table.
pub fn reconstruct_tables(text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line.trim_end());
        if cells.len() >= MIN_TABLE_CELLS {
            current.push(cells);
        } else {
            flush(&mut current, &mut tables);
        }
    }
    flush(&mut current, &mut tables);
    tables
}

fn flush(current: &mut Vec<Vec<String>>, tables: &mut Vec<RawTable>) {
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(RawTable::from_rows(std::mem::take(current)));
    } else {
        current.clear();
    }
}
