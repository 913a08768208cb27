//! Header-row location and column naming.
//!
//! Extracted tables carry no trustworthy header: the printed header row
//! may sit anywhere in the first few rows, be broken across lines, or
//! be missing entirely. The locator scans the leading rows for keyword
//! hits and assigns semantic column names from the first qualifying
//! row. Headerless tables fall back to purely positional names.

use tracing::debug;

use crate::models::{ConvertConfig, RawTable};

use super::profile::{BankProfile, PLACEHOLDER_PREFIX};

/// Outcome of header location on one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Row index of the located header, -1 when no row qualified.
    pub header_row: i64,
    /// Semantic or placeholder name per column, in table order.
    pub names: Vec<String>,
}

impl ColumnMap {
    /// Index of a column by its current name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Apply a rename table, leaving unlisted names untouched.
    pub fn rename(&mut self, table: &[(&str, &str)]) {
        for name in &mut self.names {
            if let Some((_, to)) = table.iter().find(|(from, _)| from == name) {
                *name = (*to).to_string();
            }
        }
    }
}

/// Normalize one header cell for keyword matching: uppercase, newlines
/// collapsed to spaces, trimmed.
fn normalize_cell(cell: &str) -> String {
    cell.to_uppercase().replace('\n', " ").trim().to_string()
}

/// Locate the header row and name every column.
///
/// The first `config.header_scan_rows` rows are scanned top to bottom;
/// the lowest row reaching the profile's keyword threshold wins. Cells
/// that match no keyword get positional `Col_N` placeholders, and
/// repeated semantic names are uniquified with an `_N` suffix so later
/// renames can address each occurrence.
pub fn locate_header(table: &RawTable, profile: &BankProfile, config: &ConvertConfig) -> ColumnMap {
    let width = table.width();
    let scan = table.rows.len().min(config.header_scan_rows);

    for (row_idx, row) in table.rows.iter().take(scan).enumerate() {
        let mut names: Vec<String> = Vec::with_capacity(width);
        let mut matched = 0usize;

        for (col_idx, cell) in row.iter().enumerate() {
            let normalized = normalize_cell(cell);
            match profile.match_keyword(&normalized) {
                Some(name) => {
                    matched += 1;
                    names.push(name.to_string());
                }
                None => names.push(format!("{PLACEHOLDER_PREFIX}{col_idx}")),
            }
        }
        for col_idx in row.len()..width {
            names.push(format!("{PLACEHOLDER_PREFIX}{col_idx}"));
        }

        if matched >= profile.header_threshold {
            debug!(row = row_idx, matched, "header row located");
            uniquify(&mut names);
            return ColumnMap { header_row: row_idx as i64, names };
        }
    }

    debug!("no header row found, using positional names");
    ColumnMap {
        header_row: -1,
        names: (0..width).map(|i| format!("{PLACEHOLDER_PREFIX}{i}")).collect(),
    }
}

/// Append `_1`, `_2`, ... to repeats of a name, left to right.
fn uniquify(names: &mut [String]) {
    let original = names.to_vec();
    for i in 0..names.len() {
        let seen = original[..i].iter().filter(|n| **n == original[i]).count();
        if seen > 0 {
            names[i] = format!("{}_{}", original[i], seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bank;
    use crate::statement::profile::profile_for;
    use pretty_assertions::assert_eq;

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect::<Vec<Vec<String>>>(),
        )
    }

    #[test]
    fn test_locates_bca_header_on_first_row() {
        let t = table(vec![
            vec!["TANGGAL", "KETERANGAN", "", "CBG", "MUTASI", "", "SALDO"],
            vec!["01/08", "TRSF E-BANKING DB", "", "", "150.000,00", "", "1.000.000,00"],
        ]);
        let map = locate_header(&t, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(map.header_row, 0);
        assert_eq!(
            map.names,
            vec!["TANGGAL", "KETERANGAN", "Col_2", "CBG", "MUTASI", "Col_5", "SALDO"]
        );
    }

    #[test]
    fn test_lowest_qualifying_row_wins() {
        let t = table(vec![
            vec!["PT EXAMPLE", "", ""],
            vec!["TANGGAL", "KETERANGAN", "SALDO"],
            vec!["01/08", "x", "1,00"],
        ]);
        let map = locate_header(&t, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(map.header_row, 1);
    }

    #[test]
    fn test_headerless_table_is_positional() {
        let t = table(vec![
            vec!["01/08", "TRSF E-BANKING DB", "150.000,00"],
            vec!["02/08", "KR OTOMATIS", "75.000,00"],
        ]);
        let map = locate_header(&t, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(map.header_row, -1);
        assert_eq!(map.names, vec!["Col_0", "Col_1", "Col_2"]);
    }

    #[test]
    fn test_multiline_header_cell_matches() {
        let t = table(vec![
            vec!["Tanggal\nTransaksi", "Keterangan", "Mutasi", "Saldo"],
            vec!["01/08", "x", "1,00", "2,00"],
        ]);
        let map = locate_header(&t, profile_for(Bank::Bca), &ConvertConfig::default());
        assert_eq!(map.header_row, 0);
        assert_eq!(map.names[0], "TANGGAL");
    }

    #[test]
    fn test_mandiri_nominal_becomes_duplicate_no() {
        let t = table(vec![vec![
            "No", "Tanggal", "Keterangan", "Nominal", "Saldo",
        ]]);
        let map = locate_header(&t, profile_for(Bank::Mandiri), &ConvertConfig::default());
        assert_eq!(map.header_row, 0);
        // "NOMINAL" contains "NO" so the cell resolves to NO and is
        // uniquified against the genuine NO column.
        assert_eq!(map.names, vec!["NO", "TANGGAL", "KETERANGAN", "NO_1", "SALDO"]);
    }

    #[test]
    fn test_rename_maps_duplicates_individually() {
        let mut map = ColumnMap {
            header_row: 0,
            names: vec!["NO".into(), "TANGGAL".into(), "NO_1".into()],
        };
        map.rename(&[("NO", "No"), ("TANGGAL", "Tanggal Transaksi"), ("NO_1", "Nominal")]);
        assert_eq!(map.names, vec!["No", "Tanggal Transaksi", "Nominal"]);
    }
}
