//! Transaction-date reconstruction from partial date tokens.

use chrono::NaiveDate;

use super::FieldOutcome;
use super::patterns::{DAY_MONTH, DAY_MONTH_NAME_YEAR};

/// Canonical output format for transaction dates.
pub const CANONICAL_DATE: &str = "%d/%m/%Y";

/// Complete a `DD/MM` token with the statement period year.
pub fn reconstruct_day_month(cell: &str, year: i32) -> FieldOutcome<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return FieldOutcome::Missing;
    }

    let Some(caps) = DAY_MONTH.captures(cell) else {
        return FieldOutcome::Unparsed;
    };

    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => FieldOutcome::Value(date),
        None => FieldOutcome::Unparsed,
    }
}

/// Parse a complete `DD <month-abbrev> <YYYY>` token.
pub fn reconstruct_day_month_name(cell: &str) -> FieldOutcome<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return FieldOutcome::Missing;
    }

    let Some(caps) = DAY_MONTH_NAME_YEAR.captures(cell) else {
        return FieldOutcome::Unparsed;
    };

    let day: u32 = caps[1].parse().unwrap_or(0);
    let month = month_from_name(&caps[2]);
    let year: i32 = caps[3].parse().unwrap_or(0);

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => FieldOutcome::Value(date),
        None => FieldOutcome::Unparsed,
    }
}

/// Map an Indonesian month name (full or abbreviated, English accepted)
/// to its number. Returns 0 for unknown names.
pub fn month_from_name(name: &str) -> u32 {
    let name = name.to_lowercase();

    // Full names first: statement periods print them in full.
    match name.as_str() {
        "januari" => return 1,
        "februari" => return 2,
        "maret" => return 3,
        "april" => return 4,
        "mei" => return 5,
        "juni" => return 6,
        "juli" => return 7,
        "agustus" => return 8,
        "september" => return 9,
        "oktober" => return 10,
        "november" => return 11,
        "desember" => return 12,
        _ => {}
    }

    // Abbreviations as printed in Mandiri transaction rows, with the
    // English spellings some layouts use. Prefix taken per char: the
    // token comes from a Unicode word capture and may be multibyte.
    let prefix: String = name.chars().take(3).collect();
    match prefix.as_str() {
        "jan" => 1,
        "feb" | "peb" => 2,
        "mar" => 3,
        "apr" => 4,
        "mei" | "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "agu" | "agt" | "ags" | "aug" => 8,
        "sep" => 9,
        "okt" | "oct" => 10,
        "nov" => 11,
        "des" | "dec" => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_month_with_year() {
        let outcome = reconstruct_day_month("01/03", 2024);
        assert_eq!(
            outcome.value(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_day_month_round_trip() {
        // A reconstructed date parses back to the same day/month.
        let date = reconstruct_day_month("07/11", 2023).value().unwrap();
        let rendered = date.format(CANONICAL_DATE).to_string();
        assert_eq!(rendered, "07/11/2023");

        let parsed = NaiveDate::parse_from_str(&rendered, CANONICAL_DATE).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_day_month_invalid() {
        assert!(reconstruct_day_month("31/02", 2024).is_unparsed());
        assert!(reconstruct_day_month("SALDO AWAL", 2024).is_unparsed());
        assert_eq!(reconstruct_day_month("  ", 2024), FieldOutcome::Missing);
    }

    #[test]
    fn test_day_month_name_year() {
        let outcome = reconstruct_day_month_name("01 Mar 2024");
        assert_eq!(
            outcome.value(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );

        let outcome = reconstruct_day_month_name("17 Agu 2023");
        assert_eq!(
            outcome.value(),
            Some(NaiveDate::from_ymd_opt(2023, 8, 17).unwrap())
        );
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(month_from_name("MARET"), 3);
        assert_eq!(month_from_name("Des"), 12);
        assert_eq!(month_from_name("aug"), 8);
        assert_eq!(month_from_name("xyz"), 0);
    }

    #[test]
    fn test_month_from_name_multibyte_token() {
        // Word captures are Unicode; a multibyte token must degrade to
        // "unknown month", not split a char mid-byte.
        assert_eq!(month_from_name("Δεκεμβ"), 0);
        assert_eq!(month_from_name("ŝe"), 0);
    }
}
