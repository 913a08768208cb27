//! Statement data models: raw extraction input, normalized records, and
//! the fixed output schema.

use serde::{Deserialize, Serialize};

/// Supported statement issuers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    /// Bank Central Asia.
    Bca,
    /// Bank Negara Indonesia.
    Bni,
    /// Bank Mandiri.
    Mandiri,
    /// Bank Rakyat Indonesia.
    Bri,
}

impl Bank {
    /// All supported issuers, in selector order.
    pub const ALL: [Bank; 4] = [Bank::Bca, Bank::Bni, Bank::Mandiri, Bank::Bri];

    /// Uppercase label used in generated filenames.
    pub fn label(&self) -> &'static str {
        match self {
            Bank::Bca => "BCA",
            Bank::Bni => "BNI",
            Bank::Mandiri => "MANDIRI",
            Bank::Bri => "BRI",
        }
    }

    /// Parse the lowercase selector used by callers.
    pub fn from_selector(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bca" => Some(Bank::Bca),
            "bni" => Some(Bank::Bni),
            "mandiri" => Some(Bank::Mandiri),
            "bri" => Some(Bank::Bri),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Styled spreadsheet (xlsx).
    Spreadsheet,
    /// Delimited text (csv).
    Csv,
}

impl ExportFormat {
    /// Media type declared to the caller.
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
        }
    }

    /// File extension for generated filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// One extracted page: free text plus the cell grids found on it.
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted free text for the page.
    pub text: String,
    /// Tables found on the page, in layout order.
    pub tables: Vec<RawTable>,
}

/// A raw table grid as produced by the extractor.
///
/// All rows carry the same cell count within one table; nothing is
/// guaranteed across tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Ordered rows of raw cell strings.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from string rows, padding short rows to the widest.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// Number of columns in the grid.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// True when the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Statement header fields recovered from the first page.
///
/// Every field is optional; a failed parse degrades that field only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementMetadata {
    /// Statement period month (1-12), when the issuer prints one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_month: Option<u32>,

    /// Statement period year. Falls back to the current calendar year.
    pub period_year: i32,

    /// Account holder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,

    /// Issuing branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Account number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Account currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Opening balance as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<String>,

    /// Closing balance as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<String>,

    /// Total incoming funds as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_total: Option<String>,

    /// Total outgoing funds as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing_total: Option<String>,

    /// Date the statement was printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printed_on: Option<String>,
}

/// Semantic slot a schema column maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Row sequence number (issuers with a leading "No" column).
    Sequence,
    /// Transaction date, canonical DD/MM/YYYY or empty.
    Date,
    /// Primary description.
    Description,
    /// Secondary description (issuers that split the description).
    DescriptionExtra,
    /// Credit amount.
    Inflow,
    /// Debit amount.
    Outflow,
    /// Running balance.
    Balance,
}

/// Cell alignment hint for the output serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One column of the fixed output schema for an issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column title as printed in the output.
    pub title: &'static str,
    /// Semantic field this column renders.
    pub field: Field,
    /// Data-cell alignment.
    pub align: Align,
}

/// One normalized transaction.
///
/// Invariant: at most one of `inflow` / `outflow` is non-empty; both
/// empty means the amount could not be classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Sequence number, empty unless the issuer prints one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sequence: String,

    /// Transaction date, canonical DD/MM/YYYY or empty.
    pub date: String,

    /// Primary description.
    pub description: String,

    /// Secondary description, empty unless the issuer splits it out.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description_extra: String,

    /// Credit amount (numeric string) or empty.
    pub inflow: String,

    /// Debit amount (numeric string) or empty.
    pub outflow: String,

    /// Running balance (numeric string) or empty.
    pub balance: String,
}

impl TransactionRecord {
    /// Read the cell for a semantic field.
    pub fn cell(&self, field: Field) -> &str {
        match field {
            Field::Sequence => &self.sequence,
            Field::Date => &self.date,
            Field::Description => &self.description,
            Field::DescriptionExtra => &self.description_extra,
            Field::Inflow => &self.inflow,
            Field::Outflow => &self.outflow,
            Field::Balance => &self.balance,
        }
    }

    /// Write the cell for a semantic field.
    pub fn set_cell(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Sequence => &mut self.sequence,
            Field::Date => &mut self.date,
            Field::Description => &mut self.description,
            Field::DescriptionExtra => &mut self.description_extra,
            Field::Inflow => &mut self.inflow,
            Field::Outflow => &mut self.outflow,
            Field::Balance => &mut self.balance,
        };
        *slot = value;
    }

    /// True when every schema cell is empty.
    pub fn is_empty(&self, schema: &[ColumnSpec]) -> bool {
        schema.iter().all(|c| self.cell(c.field).trim().is_empty())
    }
}

/// A fully normalized statement, ready for serialization.
#[derive(Debug, Clone)]
pub struct NormalizedStatement {
    /// Issuer the statement came from.
    pub bank: Bank,
    /// Recovered header fields.
    pub metadata: StatementMetadata,
    /// Banner lines to render above the table.
    pub header_lines: Vec<String>,
    /// Output schema for this issuer.
    pub schema: Vec<ColumnSpec>,
    /// Records in page order, then in-page row order.
    pub records: Vec<TransactionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_selector_round_trip() {
        for bank in Bank::ALL {
            assert_eq!(Bank::from_selector(&bank.label().to_lowercase()), Some(bank));
        }
        assert_eq!(Bank::from_selector("bogus"), None);
    }

    #[test]
    fn test_raw_table_padding() {
        let table = RawTable::from_rows(vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows[1], vec!["d".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_export_format_media_types() {
        assert_eq!(ExportFormat::Csv.media_type(), "text/csv");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Spreadsheet.extension(), "xlsx");
    }
}
