//! Output serialization: spreadsheet and delimited-text writers.
//!
//! The serializer boundary is the last place an error may exist. A
//! failing writer is replaced by a diagnostic document of the same
//! declared media type, so the caller always receives a well-formed
//! file.

mod delimited;
mod spreadsheet;

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use tracing::{error, warn};

use crate::models::{Bank, ConvertConfig, ExportFormat, NormalizedStatement};

pub use delimited::write_delimited;
pub use spreadsheet::write_spreadsheet;

/// Column title used in diagnostic documents.
const DIAGNOSTIC_COLUMN: &str = "Error";

/// A finished output file: bytes plus declared media type.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub data: Vec<u8>,
    pub media_type: &'static str,
}

/// Render a normalized statement in the requested format.
///
/// Serialization failures are downgraded to a diagnostic document,
/// never returned as errors.
pub fn serialize(
    statement: &NormalizedStatement,
    format: ExportFormat,
    config: &ConvertConfig,
) -> OutputDocument {
    let result = match format {
        ExportFormat::Spreadsheet => write_spreadsheet(statement, config),
        ExportFormat::Csv => write_delimited(statement),
    };
    match result {
        Ok(data) => OutputDocument { data, media_type: format.media_type() },
        Err(err) => {
            warn!(%err, "serialization failed, emitting diagnostic document");
            diagnostic(&err.to_string(), format)
        }
    }
}

/// Build a single-field diagnostic document of the requested type.
pub fn diagnostic(message: &str, format: ExportFormat) -> OutputDocument {
    let data = match format {
        ExportFormat::Spreadsheet => spreadsheet::write_diagnostic(message).unwrap_or_else(|err| {
            error!(%err, "diagnostic spreadsheet could not be written");
            Vec::new()
        }),
        ExportFormat::Csv => delimited::write_diagnostic(message),
    };
    OutputDocument { data, media_type: format.media_type() }
}

/// Collision-resistant download filename:
/// `BCA_e-statement_transactions_output_03-2024_142530_a1b2c3.xlsx`.
pub fn suggested_filename(bank: Bank, format: ExportFormat) -> String {
    let timestamp = Local::now().format("%m-%Y_%H%M%S");
    // Clock nanos alone can collide across concurrent processes that
    // start in the same instant; folding in the process id keeps the
    // suffix distinct per process.
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let suffix = (nanos ^ std::process::id().rotate_left(16)) & 0x00ff_ffff;
    format!(
        "{}_e-statement_transactions_output_{}_{:06x}.{}",
        bank.label(),
        timestamp,
        suffix,
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_csv_contains_message() {
        let doc = diagnostic("No table data found.", ExportFormat::Csv);
        let text = String::from_utf8(doc.data).unwrap();
        assert!(text.contains("Error"));
        assert!(text.contains("No table data found."));
        assert_eq!(doc.media_type, "text/csv");
    }

    #[test]
    fn test_suggested_filename_shape() {
        let name = suggested_filename(Bank::Bca, ExportFormat::Spreadsheet);
        assert!(name.starts_with("BCA_e-statement_transactions_output_"));
        assert!(name.ends_with(".xlsx"));
        let suffix = name
            .trim_end_matches(".xlsx")
            .rsplit('_')
            .next()
            .unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_diagnostic_spreadsheet_is_nonempty_zip() {
        let doc = diagnostic("No table data found.", ExportFormat::Spreadsheet);
        // xlsx files are zip archives and start with the PK magic.
        assert_eq!(&doc.data[..2], b"PK");
        assert_eq!(
            doc.media_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }
}
