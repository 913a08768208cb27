//! Per-issuer conversion profiles.
//!
//! Each issuer is described by data: its header keyword dictionary, the
//! rename table onto the output schema, the noise-row denylist, and the
//! date/amount strategies. The pipeline itself is issuer-agnostic and
//! dispatches through one profile selected per request.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Align, Bank, ColumnSpec, Field};

use super::rules::patterns::{BCA_DATE_NOISE, MANDIRI_NOISE};

/// Prefix for synthetic placeholder column names ("Col_0", "Col_1", ...).
pub const PLACEHOLDER_PREFIX: &str = "Col_";

/// One semantic column with the header keywords that identify it.
///
/// Order is significant: the first keyword containment match wins per
/// header cell, so earlier entries shadow later ones (the Mandiri "NO"
/// column deliberately captures the "NOMINAL" header as its duplicate).
#[derive(Debug, Clone, Copy)]
pub struct KeywordColumn {
    /// Semantic column name assigned on a match.
    pub name: &'static str,
    /// Literal keyword variants, matched case-insensitively by substring.
    pub keywords: &'static [&'static str],
}

/// How the single amount signal is split into inflow/outflow.
#[derive(Debug, Clone, Copy)]
pub enum ClassifyStrategy {
    /// Amount column plus a free-text description carrying DB/CR markers.
    DescriptionKeywords {
        amount_column: &'static str,
        description_column: &'static str,
        outflow_markers: &'static [&'static str],
        inflow_markers: &'static [&'static str],
    },
    /// Amount column carrying an explicit +/- sign.
    SignedAmount { amount_column: &'static str },
}

/// How partial transaction dates are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// `DD/MM` token completed with the statement period year.
    DayMonthWithPeriodYear,
    /// `DD <month-abbrev> <YYYY>` token, already complete.
    DayMonthNameYear,
}

/// Which cells the noise-row denylist is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseScope {
    /// Only the date-bearing column (BCA family).
    DateColumn,
    /// Any cell in the row (Mandiri interleaves disclaimer fragments).
    AnyColumn,
}

/// How the statement banner is recovered from first-page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStyle {
    /// Collect raw header lines up to the PERIODE marker, stripping
    /// page-break artifacts.
    PeriodBanner,
    /// Rebuild labeled banner lines from per-field regexes, `-` for
    /// fields that fail to match.
    LabeledFields,
}

/// Rendering convention for monetary cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountStyle {
    /// Trailing zeros trimmed: "150000".
    Plain,
    /// Always two decimal places: "75000.00".
    Fixed2,
}

/// Complete conversion profile for one issuer.
pub struct BankProfile {
    pub bank: Bank,

    /// Ordered header keyword dictionary.
    pub keyword_columns: &'static [KeywordColumn],

    /// Distinct keyword matches required for a row to qualify as the
    /// header row.
    pub header_threshold: usize,

    /// Rename table from raw/semantic names to output column titles.
    pub rename: &'static [(&'static str, &'static str)],

    /// Denylist for non-transactional rows.
    pub noise: &'static Regex,
    pub noise_scope: NoiseScope,

    /// Output column title holding the transaction date.
    pub date_column: &'static str,
    pub date_strategy: DateStrategy,

    /// Output column title holding the running balance, if any.
    pub balance_column: Option<&'static str>,

    pub classify: ClassifyStrategy,
    pub amount_style: AmountStyle,

    /// Skip the first and last extracted tables (Mandiri wraps the
    /// transaction tables with an account-summary table and a
    /// disclaimer table).
    pub skip_edge_tables: bool,

    pub metadata_style: MetadataStyle,

    /// Final output schema, in order.
    pub schema: &'static [ColumnSpec],

    /// Which output columns feed which record fields. Inflow/outflow
    /// are filled by the classifier and are not listed here.
    pub column_fields: &'static [(&'static str, Field)],
}

impl BankProfile {
    /// Look up the semantic name for a header cell, first match wins.
    pub fn match_keyword(&self, cell: &str) -> Option<&'static str> {
        for column in self.keyword_columns {
            for keyword in column.keywords {
                if cell.contains(keyword) {
                    return Some(column.name);
                }
            }
        }
        None
    }

    /// Semantic column names this profile guarantees in every table.
    pub fn semantic_columns(&self) -> impl Iterator<Item = &'static str> {
        self.keyword_columns.iter().map(|c| c.name)
    }
}

/// Select the profile for an issuer.
pub fn profile_for(bank: Bank) -> &'static BankProfile {
    match bank {
        Bank::Bca => &BCA_PROFILE,
        Bank::Bni => &BNI_PROFILE,
        Bank::Mandiri => &MANDIRI_PROFILE,
        Bank::Bri => &BRI_PROFILE,
    }
}

const KEYWORD_OUTFLOW_MARKERS: &[&str] = &["DB", "DEBIT"];
const KEYWORD_INFLOW_MARKERS: &[&str] = &["CR", "CREDIT", "KR OTOMATIS"];

const BCA_FAMILY_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec { title: "Tanggal Transaksi", field: Field::Date, align: Align::Left },
    ColumnSpec { title: "Keterangan Utama", field: Field::Description, align: Align::Left },
    ColumnSpec { title: "Keterangan Tambahan", field: Field::DescriptionExtra, align: Align::Left },
    ColumnSpec { title: "Uang Masuk", field: Field::Inflow, align: Align::Right },
    ColumnSpec { title: "Uang Keluar", field: Field::Outflow, align: Align::Right },
    ColumnSpec { title: "Saldo", field: Field::Balance, align: Align::Right },
];

const BCA_FAMILY_COLUMN_FIELDS: &[(&str, Field)] = &[
    ("Tanggal Transaksi", Field::Date),
    ("Keterangan Utama", Field::Description),
    ("Keterangan Tambahan", Field::DescriptionExtra),
    ("Saldo", Field::Balance),
];

const MANDIRI_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec { title: "No", field: Field::Sequence, align: Align::Center },
    ColumnSpec { title: "Tanggal Transaksi", field: Field::Date, align: Align::Left },
    ColumnSpec { title: "Keterangan Utama", field: Field::Description, align: Align::Left },
    ColumnSpec { title: "Uang Masuk", field: Field::Inflow, align: Align::Right },
    ColumnSpec { title: "Uang Keluar", field: Field::Outflow, align: Align::Right },
    ColumnSpec { title: "Saldo", field: Field::Balance, align: Align::Right },
];

const MANDIRI_COLUMN_FIELDS: &[(&str, Field)] = &[
    ("No", Field::Sequence),
    ("Tanggal Transaksi", Field::Date),
    ("Keterangan Utama", Field::Description),
    ("Saldo", Field::Balance),
];

lazy_static! {
    pub static ref BCA_PROFILE: BankProfile = BankProfile {
        bank: Bank::Bca,
        keyword_columns: &[
            KeywordColumn { name: "TANGGAL", keywords: &["TANGGAL", "DATE"] },
            KeywordColumn { name: "KETERANGAN", keywords: &["KETERANGAN", "DESCRIPTION", "DETAIL"] },
            KeywordColumn { name: "CBG", keywords: &["CBG", "BRANCH"] },
            KeywordColumn { name: "MUTASI", keywords: &["MUTASI", "DEBIT", "CREDIT", "AMOUNT"] },
            KeywordColumn { name: "SALDO", keywords: &["SALDO", "BALANCE"] },
        ],
        header_threshold: 3,
        rename: &[
            ("TANGGAL", "Tanggal Transaksi"),
            ("Col_1", "Keterangan Utama"),
            ("KETERANGAN", "Keterangan Tambahan"),
            ("MUTASI", "Mutasi"),
            ("Col_5", "Type"),
            ("SALDO", "Saldo"),
        ],
        noise: &BCA_DATE_NOISE,
        noise_scope: NoiseScope::DateColumn,
        date_column: "Tanggal Transaksi",
        date_strategy: DateStrategy::DayMonthWithPeriodYear,
        balance_column: Some("Saldo"),
        classify: ClassifyStrategy::DescriptionKeywords {
            amount_column: "Mutasi",
            description_column: "Keterangan Utama",
            outflow_markers: KEYWORD_OUTFLOW_MARKERS,
            inflow_markers: KEYWORD_INFLOW_MARKERS,
        },
        amount_style: AmountStyle::Plain,
        skip_edge_tables: false,
        metadata_style: MetadataStyle::PeriodBanner,
        schema: BCA_FAMILY_SCHEMA,
        column_fields: BCA_FAMILY_COLUMN_FIELDS,
    };

    // BNI and BRI statements follow the BCA family shape: a DD/MM date
    // column, a DB/CR-tagged description, one amount column, and a
    // running balance. They differ only in header wording.
    pub static ref BNI_PROFILE: BankProfile = BankProfile {
        bank: Bank::Bni,
        keyword_columns: &[
            KeywordColumn { name: "TANGGAL", keywords: &["TANGGAL", "POST DATE", "DATE"] },
            KeywordColumn { name: "KETERANGAN", keywords: &["KETERANGAN", "URAIAN", "DESCRIPTION"] },
            KeywordColumn { name: "CBG", keywords: &["CBG", "CABANG", "BRANCH"] },
            KeywordColumn { name: "MUTASI", keywords: &["MUTASI", "DEBET", "DEBIT", "KREDIT", "CREDIT", "AMOUNT"] },
            KeywordColumn { name: "SALDO", keywords: &["SALDO", "BALANCE"] },
        ],
        header_threshold: 3,
        rename: &[
            ("TANGGAL", "Tanggal Transaksi"),
            ("Col_1", "Keterangan Utama"),
            ("KETERANGAN", "Keterangan Tambahan"),
            ("MUTASI", "Mutasi"),
            ("Col_5", "Type"),
            ("SALDO", "Saldo"),
        ],
        noise: &BCA_DATE_NOISE,
        noise_scope: NoiseScope::DateColumn,
        date_column: "Tanggal Transaksi",
        date_strategy: DateStrategy::DayMonthWithPeriodYear,
        balance_column: Some("Saldo"),
        classify: ClassifyStrategy::DescriptionKeywords {
            amount_column: "Mutasi",
            description_column: "Keterangan Utama",
            outflow_markers: KEYWORD_OUTFLOW_MARKERS,
            inflow_markers: KEYWORD_INFLOW_MARKERS,
        },
        amount_style: AmountStyle::Plain,
        skip_edge_tables: false,
        metadata_style: MetadataStyle::PeriodBanner,
        schema: BCA_FAMILY_SCHEMA,
        column_fields: BCA_FAMILY_COLUMN_FIELDS,
    };

    pub static ref MANDIRI_PROFILE: BankProfile = BankProfile {
        bank: Bank::Mandiri,
        keyword_columns: &[
            KeywordColumn { name: "NO", keywords: &["NO", "NO."] },
            KeywordColumn { name: "TANGGAL", keywords: &["TANGGAL", "DATE"] },
            KeywordColumn { name: "KETERANGAN", keywords: &["KETERANGAN", "REMARKS", "URAIAN"] },
            KeywordColumn { name: "NOMINAL", keywords: &["NOMINAL", "AMOUNT"] },
            KeywordColumn { name: "SALDO", keywords: &["SALDO", "BALANCE"] },
        ],
        header_threshold: 5,
        // The NOMINAL header contains "NO" and is captured by the NO
        // column as its first duplicate, hence the NO_1 entry.
        rename: &[
            ("NO", "No"),
            ("TANGGAL", "Tanggal Transaksi"),
            ("KETERANGAN", "Keterangan Utama"),
            ("NO_1", "Nominal"),
            ("SALDO", "Saldo"),
        ],
        noise: &MANDIRI_NOISE,
        noise_scope: NoiseScope::AnyColumn,
        date_column: "Tanggal Transaksi",
        date_strategy: DateStrategy::DayMonthNameYear,
        balance_column: Some("Saldo"),
        classify: ClassifyStrategy::SignedAmount { amount_column: "Nominal" },
        amount_style: AmountStyle::Fixed2,
        skip_edge_tables: true,
        metadata_style: MetadataStyle::LabeledFields,
        schema: MANDIRI_SCHEMA,
        column_fields: MANDIRI_COLUMN_FIELDS,
    };

    pub static ref BRI_PROFILE: BankProfile = BankProfile {
        bank: Bank::Bri,
        keyword_columns: &[
            KeywordColumn { name: "TANGGAL", keywords: &["TANGGAL", "TRANSACTION DATE", "DATE"] },
            KeywordColumn { name: "KETERANGAN", keywords: &["KETERANGAN", "URAIAN", "DESCRIPTION", "REMARK"] },
            KeywordColumn { name: "CBG", keywords: &["CBG", "TELLER", "BRANCH"] },
            KeywordColumn { name: "MUTASI", keywords: &["MUTASI", "DEBET", "DEBIT", "KREDIT", "CREDIT", "AMOUNT"] },
            KeywordColumn { name: "SALDO", keywords: &["SALDO", "BALANCE"] },
        ],
        header_threshold: 3,
        rename: &[
            ("TANGGAL", "Tanggal Transaksi"),
            ("Col_1", "Keterangan Utama"),
            ("KETERANGAN", "Keterangan Tambahan"),
            ("MUTASI", "Mutasi"),
            ("Col_5", "Type"),
            ("SALDO", "Saldo"),
        ],
        noise: &BCA_DATE_NOISE,
        noise_scope: NoiseScope::DateColumn,
        date_column: "Tanggal Transaksi",
        date_strategy: DateStrategy::DayMonthWithPeriodYear,
        balance_column: Some("Saldo"),
        classify: ClassifyStrategy::DescriptionKeywords {
            amount_column: "Mutasi",
            description_column: "Keterangan Utama",
            outflow_markers: KEYWORD_OUTFLOW_MARKERS,
            inflow_markers: KEYWORD_INFLOW_MARKERS,
        },
        amount_style: AmountStyle::Plain,
        skip_edge_tables: false,
        metadata_style: MetadataStyle::PeriodBanner,
        schema: BCA_FAMILY_SCHEMA,
        column_fields: BCA_FAMILY_COLUMN_FIELDS,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_keyword_match_wins() {
        let profile = profile_for(Bank::Mandiri);
        // "NOMINAL" contains "NO" and must resolve to the NO column,
        // which the rename table then maps through the NO_1 duplicate.
        assert_eq!(profile.match_keyword("NOMINAL"), Some("NO"));
        assert_eq!(profile.match_keyword("TANGGAL"), Some("TANGGAL"));
        assert_eq!(profile.match_keyword("SALDO"), Some("SALDO"));
    }

    #[test]
    fn test_every_bank_has_a_profile() {
        for bank in Bank::ALL {
            let profile = profile_for(bank);
            assert_eq!(profile.bank, bank);
            assert!(!profile.schema.is_empty());
            assert!(profile.header_threshold >= 3);
        }
    }

    #[test]
    fn test_bca_keywords() {
        let profile = profile_for(Bank::Bca);
        assert_eq!(profile.match_keyword("TANGGAL"), Some("TANGGAL"));
        assert_eq!(profile.match_keyword("MUTASI"), Some("MUTASI"));
        assert_eq!(profile.match_keyword("BALANCE"), Some("SALDO"));
        assert_eq!(profile.match_keyword("UNRELATED"), None);
    }
}
