//! Inflow/outflow classification of the single amount signal.
//!
//! Pure per-row logic: at most one of the two new columns is populated
//! per row, an unclassifiable amount leaves both empty and keeps the
//! row.

use tracing::debug;

use crate::models::ConvertConfig;

use super::normalize::Frame;
use super::profile::{AmountStyle, BankProfile, ClassifyStrategy};
use super::rules::amounts::{parse_amount, parse_signed_amount, render_fixed2, render_plain, Sign};

pub const INFLOW_COLUMN: &str = "Uang Masuk";
pub const OUTFLOW_COLUMN: &str = "Uang Keluar";

fn render(amount: rust_decimal::Decimal, style: AmountStyle) -> String {
    match style {
        AmountStyle::Plain => render_plain(amount),
        AmountStyle::Fixed2 => render_fixed2(amount),
    }
}

/// Split each row's amount into the inflow/outflow columns.
///
/// The two columns are inserted immediately before the balance column
/// so the final layout reads amount-in, amount-out, balance.
pub fn classify_rows(frame: &mut Frame, profile: &BankProfile, config: &ConvertConfig) {
    let split: Vec<(String, String)> = (0..frame.rows.len())
        .map(|row| classify_row(frame, row, profile, config))
        .collect();

    let at = profile
        .balance_column
        .and_then(|name| frame.column(name))
        .unwrap_or(frame.columns.len());
    frame.insert_column(at, INFLOW_COLUMN);
    frame.insert_column(at + 1, OUTFLOW_COLUMN);

    let inflow_idx = at;
    let outflow_idx = at + 1;
    for (row, (inflow, outflow)) in frame.rows.iter_mut().zip(split) {
        row[inflow_idx] = inflow;
        row[outflow_idx] = outflow;
    }
}

fn classify_row(
    frame: &Frame,
    row: usize,
    profile: &BankProfile,
    config: &ConvertConfig,
) -> (String, String) {
    match profile.classify {
        ClassifyStrategy::DescriptionKeywords {
            amount_column,
            description_column,
            outflow_markers,
            inflow_markers,
        } => {
            let Some(amount) = parse_amount(frame.cell(row, amount_column)) else {
                return (String::new(), String::new());
            };
            let rendered = render(amount, profile.amount_style);
            let description = frame.cell(row, description_column).to_uppercase();

            if outflow_markers.iter().any(|m| description.contains(m)) {
                (String::new(), rendered)
            } else if inflow_markers.iter().any(|m| description.contains(m)) {
                (rendered, String::new())
            } else if description.trim().is_empty() {
                if config.blank_description_is_outflow {
                    (String::new(), rendered)
                } else {
                    (String::new(), String::new())
                }
            } else {
                // Unmarked descriptions follow the issuer's observed
                // convention and count as outflow.
                (String::new(), rendered)
            }
        }
        ClassifyStrategy::SignedAmount { amount_column } => {
            let cell = frame.cell(row, amount_column);
            let (sign, amount) = parse_signed_amount(cell);
            let Some(amount) = amount else {
                if !cell.trim().is_empty() {
                    debug!(row, cell, "amount cell did not parse");
                }
                return (String::new(), String::new());
            };
            let magnitude = render(amount.abs(), profile.amount_style);
            match sign {
                Some(Sign::Plus) => (magnitude, String::new()),
                Some(Sign::Minus) => (String::new(), magnitude),
                None if amount.is_sign_positive() && !amount.is_zero() => {
                    (magnitude, String::new())
                }
                None if amount.is_sign_negative() => (String::new(), magnitude),
                None => (String::new(), String::new()),
            }
        }
    }
}

/// Re-render the running balance in the issuer's amount style.
/// A balance that fails to parse is kept as printed.
pub fn normalize_balance(frame: &mut Frame, profile: &BankProfile) {
    let Some(name) = profile.balance_column else {
        return;
    };
    let style = profile.amount_style;
    frame.map_column(name, |_, cell| match parse_amount(cell) {
        Some(amount) => render(amount, style),
        None => cell.trim().to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bank;
    use crate::statement::profile::profile_for;
    use pretty_assertions::assert_eq;

    fn bca_frame(rows: Vec<Vec<&str>>) -> Frame {
        Frame {
            columns: vec![
                "Tanggal Transaksi".into(),
                "Keterangan Utama".into(),
                "Mutasi".into(),
                "Saldo".into(),
            ],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    fn mandiri_frame(rows: Vec<Vec<&str>>) -> Frame {
        Frame {
            columns: vec![
                "No".into(),
                "Tanggal Transaksi".into(),
                "Keterangan Utama".into(),
                "Nominal".into(),
                "Saldo".into(),
            ],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn test_keyword_outflow() {
        let mut frame = bca_frame(vec![vec!["01/03", "TRSF E-BANKING DB", "150.000,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "150000");
    }

    #[test]
    fn test_keyword_inflow() {
        let mut frame = bca_frame(vec![vec!["01/03", "KR OTOMATIS", "2.500,50", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "2500.5");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "");
    }

    #[test]
    fn test_blank_description_defaults_to_outflow() {
        let mut frame = bca_frame(vec![vec!["01/03", "", "100,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "100");
    }

    #[test]
    fn test_blank_description_bias_is_configurable() {
        let config = ConvertConfig {
            blank_description_is_outflow: false,
            ..ConvertConfig::default()
        };
        let mut frame = bca_frame(vec![vec!["01/03", "", "100,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &config);
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "");
    }

    #[test]
    fn test_unparsable_amount_leaves_both_empty() {
        let mut frame = bca_frame(vec![vec!["01/03", "TRSF DB", "n/a", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "");
    }

    #[test]
    fn test_signed_minus_is_outflow() {
        let mut frame = mandiri_frame(vec![vec!["1", "01 Mar 2024", "BIAYA ADMIN", "-75.000,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Mandiri), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "75000.00");
    }

    #[test]
    fn test_signed_plus_is_inflow() {
        let mut frame = mandiri_frame(vec![vec!["1", "01 Mar 2024", "GAJI", "+1.500.000,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Mandiri), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "1500000.00");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "");
    }

    #[test]
    fn test_unsigned_zero_leaves_both_empty() {
        let mut frame = mandiri_frame(vec![vec!["1", "01 Mar 2024", "x", "0,00", "1,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Mandiri), &ConvertConfig::default());
        assert_eq!(frame.cell(0, INFLOW_COLUMN), "");
        assert_eq!(frame.cell(0, OUTFLOW_COLUMN), "");
    }

    #[test]
    fn test_columns_inserted_before_balance() {
        let mut frame = bca_frame(vec![vec!["01/03", "TRSF DB", "1,00", "2,00"]]);
        classify_rows(&mut frame, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(
            frame.columns,
            vec![
                "Tanggal Transaksi",
                "Keterangan Utama",
                "Mutasi",
                "Uang Masuk",
                "Uang Keluar",
                "Saldo",
            ]
        );
    }

    #[test]
    fn test_balance_normalized_per_style() {
        let mut frame = bca_frame(vec![vec!["01/03", "x", "1,00", "2.150.000,00"]]);
        normalize_balance(&mut frame, profile_for(Bank::Bca));
        assert_eq!(frame.cell(0, "Saldo"), "2150000");
    }
}
