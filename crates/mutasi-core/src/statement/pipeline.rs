//! The per-request conversion pipeline.
//!
//! One converter is built per request from an issuer profile and an
//! immutable configuration, then driven synchronously: banner
//! extraction, per-table normalization, date reconstruction,
//! classification, merge, serialization. Table order and in-table row
//! order are preserved end to end.

use tracing::{debug, info, warn};

use crate::error::StatementError;
use crate::export::{self, OutputDocument};
use crate::models::{
    Bank, ConvertConfig, ExportFormat, NormalizedStatement, RawPage, RawTable, StatementMetadata,
    TransactionRecord,
};

use super::classify::{classify_rows, normalize_balance, INFLOW_COLUMN, OUTFLOW_COLUMN};
use super::header::locate_header;
use super::metadata::extract_header;
use super::normalize::{normalize_table, Frame};
use super::profile::{profile_for, BankProfile, DateStrategy};
use super::rules::dates::{reconstruct_day_month, reconstruct_day_month_name, CANONICAL_DATE};
use super::rules::FieldOutcome;

pub struct StatementConverter {
    profile: &'static BankProfile,
    config: ConvertConfig,
}

impl StatementConverter {
    pub fn new(bank: Bank, config: ConvertConfig) -> Self {
        Self { profile: profile_for(bank), config }
    }

    pub fn bank(&self) -> Bank {
        self.profile.bank
    }

    /// Run the pipeline over extracted pages.
    ///
    /// Fails only for the two empty-input cases; everything below the
    /// table level degrades per row or per field instead.
    pub fn convert(&self, pages: &[RawPage]) -> Result<NormalizedStatement, StatementError> {
        let first_text = pages.first().map(|p| p.text.as_str()).unwrap_or("");
        let header = extract_header(first_text, self.profile);

        let mut tables: Vec<&RawTable> = pages.iter().flat_map(|p| p.tables.iter()).collect();
        if tables.is_empty() {
            return Err(StatementError::NoTables);
        }
        if self.profile.skip_edge_tables {
            // The first table is the account summary, the last the
            // disclaimer block.
            tables = if tables.len() > 2 {
                tables[1..tables.len() - 1].to_vec()
            } else {
                Vec::new()
            };
        }

        let mut records = Vec::new();
        for table in tables {
            records.extend(self.convert_table(table, &header.metadata));
        }
        if records.is_empty() {
            return Err(StatementError::NoRows);
        }

        info!(
            bank = self.profile.bank.label(),
            records = records.len(),
            "statement converted"
        );
        Ok(NormalizedStatement {
            bank: self.profile.bank,
            metadata: header.metadata,
            header_lines: header.lines,
            schema: self.profile.schema.to_vec(),
            records,
        })
    }

    fn convert_table(&self, table: &RawTable, metadata: &StatementMetadata) -> Vec<TransactionRecord> {
        if table.is_empty() {
            return Vec::new();
        }
        let map = locate_header(table, self.profile, &self.config);
        let mut frame = normalize_table(table, &map, self.profile);
        self.reconstruct_dates(&mut frame, metadata);
        classify_rows(&mut frame, self.profile, &self.config);
        normalize_balance(&mut frame, self.profile);
        self.build_records(&frame)
    }

    /// Rewrite the date column to canonical DD/MM/YYYY. A cell that
    /// fails to parse becomes empty; the row is kept.
    fn reconstruct_dates(&self, frame: &mut Frame, metadata: &StatementMetadata) {
        let strategy = self.profile.date_strategy;
        let year = metadata.period_year;
        frame.map_column(self.profile.date_column, |row, cell| {
            let outcome = match strategy {
                DateStrategy::DayMonthWithPeriodYear => reconstruct_day_month(cell, year),
                DateStrategy::DayMonthNameYear => reconstruct_day_month_name(cell),
            };
            match outcome {
                FieldOutcome::Value(date) => date.format(CANONICAL_DATE).to_string(),
                FieldOutcome::Missing => String::new(),
                FieldOutcome::Unparsed => {
                    debug!(row, cell, "date cell did not parse");
                    String::new()
                }
            }
        });
    }

    /// Project the frame onto trusted records, discarding working
    /// columns (raw amount, branch code, surplus positional data).
    fn build_records(&self, frame: &Frame) -> Vec<TransactionRecord> {
        let carried: Vec<&str> = self
            .profile
            .column_fields
            .iter()
            .map(|(title, _)| *title)
            .chain([INFLOW_COLUMN, OUTFLOW_COLUMN])
            .collect();
        let discarded: Vec<&str> = frame
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !carried.contains(c))
            .collect();
        if !discarded.is_empty() {
            debug!(?discarded, "working columns discarded");
        }

        let mut records = Vec::with_capacity(frame.rows.len());
        for row in 0..frame.rows.len() {
            let mut record = TransactionRecord::default();
            for (title, field) in self.profile.column_fields {
                record.set_cell(*field, frame.cell(row, title).to_string());
            }
            record.inflow = frame.cell(row, INFLOW_COLUMN).to_string();
            record.outflow = frame.cell(row, OUTFLOW_COLUMN).to_string();
            if !record.is_empty(self.profile.schema) {
                records.push(record);
            }
        }
        records
    }
}

/// Top-level entry point: convert extracted pages straight to an
/// output file. Conversion failures become diagnostic documents of
/// the requested media type, never errors.
pub fn convert_document(
    pages: &[RawPage],
    bank: Bank,
    format: ExportFormat,
    config: &ConvertConfig,
) -> OutputDocument {
    let converter = StatementConverter::new(bank, config.clone());
    match converter.convert(pages) {
        Ok(statement) => export::serialize(&statement, format, config),
        Err(err) => {
            warn!(bank = bank.label(), %err, "conversion produced no data");
            export::diagnostic(&err.to_string(), format)
        }
    }
}
