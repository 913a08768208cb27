//! Delimited-text rendering via the csv crate.
//!
//! Banner lines become quoted pseudo-rows padded with trailing
//! delimiters to the data width, so spreadsheet readers keep them on
//! their own rows above the table. All cells are emitted as literal
//! text, amounts and dates included.

use csv::Writer;

use crate::error::ExportError;
use crate::models::NormalizedStatement;

pub fn write_delimited(statement: &NormalizedStatement) -> Result<Vec<u8>, ExportError> {
    let width = statement.schema.len();
    let mut out = String::new();
    for line in &statement.header_lines {
        out.push('"');
        out.push_str(&line.replace('"', "\"\""));
        out.push('"');
        out.push_str(&",".repeat(width.saturating_sub(1)));
        out.push('\n');
    }

    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(statement.schema.iter().map(|spec| spec.title))
        .map_err(to_export_error)?;
    for record in &statement.records {
        writer
            .write_record(statement.schema.iter().map(|spec| record.cell(spec.field)))
            .map_err(to_export_error)?;
    }
    let body = writer
        .into_inner()
        .map_err(|err| ExportError::Delimited(err.to_string()))?;

    let mut data = out.into_bytes();
    data.extend_from_slice(&body);
    Ok(data)
}

/// Single-field diagnostic rendering. Infallible by construction.
pub fn write_diagnostic(message: &str) -> Vec<u8> {
    let mut writer = Writer::from_writer(Vec::new());
    let _ = writer.write_record([super::DIAGNOSTIC_COLUMN]);
    let _ = writer.write_record([message]);
    writer.into_inner().unwrap_or_default()
}

fn to_export_error(err: csv::Error) -> ExportError {
    ExportError::Delimited(err.to_string())
}
