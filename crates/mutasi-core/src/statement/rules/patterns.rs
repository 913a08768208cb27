//! Regex patterns for Indonesian bank statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Page-break artifact printed into BCA header lines ("HALAMAN : 1 / 2").
    pub static ref PAGE_MARKER: Regex = Regex::new(
        r"(?i)\bHALAMAN\s*:\s*\d+\s*/\s*\d+\b"
    ).unwrap();

    // BCA period line: "PERIODE : MARET 2024".
    pub static ref BCA_PERIOD: Regex = Regex::new(
        r"(?i)PERIODE\s*:\s*(\w+)\s+(\d{4})"
    ).unwrap();

    // Mandiri labeled header fields (bilingual labels as printed).
    pub static ref MANDIRI_NAME: Regex = Regex::new(
        r"Nama/Name\s*:\s*(.+?)\s+Periode"
    ).unwrap();

    pub static ref MANDIRI_PERIOD_RANGE: Regex = Regex::new(
        r"Periode/Period\s*:\s*(\d{2}\s\w+\s\d{4})\s*-\s*(\d{2}\s\w+\s\d{4})"
    ).unwrap();

    pub static ref MANDIRI_BRANCH: Regex = Regex::new(
        r"Cabang/Branch\s*:\s*(.+?)\s+Dicetak"
    ).unwrap();

    pub static ref MANDIRI_PRINTED_ON: Regex = Regex::new(
        r"Dicetak pada/Issued on\s*:\s*(\d{2}\s\w+\s\d{4})"
    ).unwrap();

    pub static ref MANDIRI_ACCOUNT_NUMBER: Regex = Regex::new(
        r"Nomor Rekening/Account Number\s*:\s*(\d+)"
    ).unwrap();

    pub static ref MANDIRI_CURRENCY: Regex = Regex::new(
        r"Mata Uang/Currency\s*:\s*(\w+)"
    ).unwrap();

    pub static ref MANDIRI_OPENING_BALANCE: Regex = Regex::new(
        r"Saldo Awal/Initial Balance\s*:\s*([0-9.,+-]+)"
    ).unwrap();

    pub static ref MANDIRI_INCOMING: Regex = Regex::new(
        r"(?i)Dana\s+Masuk/Incoming\s+Transactions\s*:\s*([+-]?\s*[\d.,]+)"
    ).unwrap();

    pub static ref MANDIRI_OUTGOING: Regex = Regex::new(
        r"Dana Keluar/Outgoing Transactions\s*:\s*([0-9.,+-]+)"
    ).unwrap();

    pub static ref MANDIRI_CLOSING_BALANCE: Regex = Regex::new(
        r"Saldo Akhir/Closing Balance\s*:\s*([0-9.,+-]+)"
    ).unwrap();

    // Non-transactional rows in BCA-family date columns. Case-sensitive,
    // as printed: opening-balance banner, page footer, "continued".
    pub static ref BCA_DATE_NOISE: Regex = Regex::new(
        r"SALDO AWAL|HALAMAN|Bersambung"
    ).unwrap();

    // Non-transactional rows anywhere in a Mandiri grid (summary and
    // disclaimer fragments interleave with the transaction tables).
    pub static ref MANDIRI_NOISE: Regex = Regex::new(
        r"(?i)SALDO|DISCLAIMER|LPS|DITERBITKAN|PERIODE|CATATAN|STATEMENT|DOKUMEN|KEBERATAN|SYARAT|KETENTUAN|E-STATEMENT"
    ).unwrap();

    // Partial transaction date: "01/03" (day/month, year comes from the
    // statement period).
    pub static ref DAY_MONTH: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})$"
    ).unwrap();

    // Complete transaction date with month name: "01 Mar 2024".
    pub static ref DAY_MONTH_NAME_YEAR: Regex = Regex::new(
        r"^(\d{1,2})\s+([A-Za-z]{3,})\s+(\d{4})$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_marker() {
        assert!(PAGE_MARKER.is_match("KCU JAKARTA HALAMAN : 1 / 2"));
        assert!(PAGE_MARKER.is_match("halaman: 3/10"));
        assert!(!PAGE_MARKER.is_match("HALAMAN TERAKHIR"));
    }

    #[test]
    fn test_bca_period() {
        let caps = BCA_PERIOD.captures("PERIODE : MARET 2024").unwrap();
        assert_eq!(&caps[1], "MARET");
        assert_eq!(&caps[2], "2024");
    }

    #[test]
    fn test_mandiri_period_range() {
        let caps = MANDIRI_PERIOD_RANGE
            .captures("Periode/Period : 01 Mar 2024 - 31 Mar 2024")
            .unwrap();
        assert_eq!(&caps[1], "01 Mar 2024");
        assert_eq!(&caps[2], "31 Mar 2024");
    }

    #[test]
    fn test_bca_date_noise_is_case_sensitive() {
        assert!(BCA_DATE_NOISE.is_match("SALDO AWAL"));
        assert!(BCA_DATE_NOISE.is_match("Bersambung ke halaman berikut".trim()));
        assert!(!BCA_DATE_NOISE.is_match("saldo awal"));
    }
}
