//! Styled spreadsheet rendering via rust_xlsxwriter.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::ExportError;
use crate::models::{Align, ConvertConfig, Field, NormalizedStatement};

const SHEET_NAME: &str = "Transaksi";

fn banner_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn title_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn data_format(align: Align) -> Format {
    let format = Format::new().set_border(FormatBorder::Thin);
    match align {
        Align::Left => format.set_align(FormatAlign::Left),
        Align::Center => format.set_align(FormatAlign::Center),
        Align::Right => format.set_align(FormatAlign::Right),
    }
}

/// Write the full styled workbook: merged banner lines, bold schema
/// row, bordered data rows with per-column alignment, auto-sized
/// column widths.
pub fn write_spreadsheet(
    statement: &NormalizedStatement,
    config: &ConvertConfig,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(to_export_error)?;

    let width = statement.schema.len() as u16;
    let banner = banner_format();
    for (row, line) in statement.header_lines.iter().enumerate() {
        let row = row as u32;
        sheet
            .merge_range(row, 0, row, width - 1, line, &banner)
            .map_err(to_export_error)?;
    }

    // One blank row separates the banner from the table.
    let table_start = if statement.header_lines.is_empty() {
        0
    } else {
        statement.header_lines.len() as u32 + 1
    };

    let title = title_format();
    for (col, spec) in statement.schema.iter().enumerate() {
        sheet
            .write_string_with_format(table_start, col as u16, spec.title, &title)
            .map_err(to_export_error)?;
    }

    for (row_idx, record) in statement.records.iter().enumerate() {
        let row = table_start + 1 + row_idx as u32;
        for (col, spec) in statement.schema.iter().enumerate() {
            sheet
                .write_string_with_format(
                    row,
                    col as u16,
                    record.cell(spec.field),
                    &data_format(spec.align),
                )
                .map_err(to_export_error)?;
        }
    }

    size_columns(sheet, statement, config)?;

    workbook.save_to_buffer().map_err(to_export_error)
}

/// Width per column: longest literal content plus padding, bounded
/// below by the configured minimum and, for the date column, above by
/// the configured cap.
fn size_columns(
    sheet: &mut Worksheet,
    statement: &NormalizedStatement,
    config: &ConvertConfig,
) -> Result<(), ExportError> {
    for (col, spec) in statement.schema.iter().enumerate() {
        let longest = statement
            .records
            .iter()
            .map(|r| r.cell(spec.field).chars().count())
            .chain(std::iter::once(spec.title.chars().count()))
            .max()
            .unwrap_or(0);
        let mut width = (longest as f64 + 2.0).max(config.min_column_width);
        if spec.field == Field::Date {
            width = width.min(config.date_column_width_cap);
        }
        sheet
            .set_column_width(col as u16, width)
            .map_err(to_export_error)?;
    }
    Ok(())
}

/// Single-field diagnostic workbook.
pub fn write_diagnostic(message: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .write_string_with_format(0, 0, super::DIAGNOSTIC_COLUMN, &Format::new().set_bold())
        .map_err(to_export_error)?;
    sheet.write_string(1, 0, message).map_err(to_export_error)?;
    workbook.save_to_buffer().map_err(to_export_error)
}

fn to_export_error(err: rust_xlsxwriter::XlsxError) -> ExportError {
    ExportError::Spreadsheet(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bank, TransactionRecord};
    use crate::statement::profile_for;

    fn statement() -> NormalizedStatement {
        let profile = profile_for(Bank::Bca);
        NormalizedStatement {
            bank: Bank::Bca,
            metadata: Default::default(),
            header_lines: vec!["PT BANK".into(), "PERIODE : MARET 2024".into()],
            schema: profile.schema.to_vec(),
            records: vec![TransactionRecord {
                date: "01/03/2024".into(),
                description: "TRANSFER CR".into(),
                inflow: "150000".into(),
                balance: "2150000".into(),
                ..TransactionRecord::default()
            }],
        }
    }

    #[test]
    fn test_workbook_is_written() {
        let data = write_spreadsheet(&statement(), &ConvertConfig::default()).unwrap();
        assert_eq!(&data[..2], b"PK");
    }

    #[test]
    fn test_empty_banner_starts_table_at_top() {
        let mut s = statement();
        s.header_lines.clear();
        let data = write_spreadsheet(&s, &ConvertConfig::default()).unwrap();
        assert!(!data.is_empty());
    }
}
