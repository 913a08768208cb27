//! Statement banner recovery from first-page text.
//!
//! Pure parsing: every field degrades independently to its fallback,
//! nothing here can fail a conversion.

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::models::StatementMetadata;

use super::profile::{BankProfile, MetadataStyle};
use super::rules::dates::month_from_name;
use super::rules::patterns;

/// Banner lines plus structured metadata for one statement.
#[derive(Debug, Clone, Default)]
pub struct ExtractedHeader {
    pub metadata: StatementMetadata,
    pub lines: Vec<String>,
}

/// Extract the statement banner according to the issuer's style.
pub fn extract_header(first_page_text: &str, profile: &BankProfile) -> ExtractedHeader {
    match profile.metadata_style {
        MetadataStyle::PeriodBanner => extract_period_banner(first_page_text),
        MetadataStyle::LabeledFields => extract_labeled_fields(first_page_text),
    }
}

/// BCA family: collect raw header lines up to and including the
/// PERIODE line, stripping page-break artifacts. A statement with no
/// period marker yields an empty banner and the current year.
fn extract_period_banner(text: &str) -> ExtractedHeader {
    let mut metadata = StatementMetadata {
        period_year: Utc::now().year(),
        ..StatementMetadata::default()
    };

    if let Some(captures) = patterns::BCA_PERIOD.captures(text) {
        let month = month_from_name(&captures[1]);
        if month > 0 {
            metadata.period_month = Some(month);
        }
        if let Ok(year) = captures[2].parse::<i32>() {
            metadata.period_year = year;
        }
    } else {
        debug!("no period line found, using current year");
        return ExtractedHeader { metadata, lines: Vec::new() };
    }

    let mut lines = Vec::new();
    for line in text.lines() {
        let cleaned = patterns::PAGE_MARKER.replace_all(line, "").trim().to_string();
        let is_period_line = cleaned.to_uppercase().contains("PERIODE");
        lines.push(cleaned);
        if is_period_line {
            break;
        }
    }

    ExtractedHeader { metadata, lines }
}

fn capture(regex: &regex::Regex, text: &str, group: usize) -> Option<String> {
    regex
        .captures(text)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().trim().to_string())
}

fn labeled(label: &str, value: &Option<String>) -> String {
    format!("{} : {}", label, value.as_deref().unwrap_or("-"))
}

/// Mandiri: rebuild labeled banner lines from per-field regexes, `-`
/// for any field that fails to match. The transaction dates carry
/// their own year; the period end date supplies the fallback.
fn extract_labeled_fields(text: &str) -> ExtractedHeader {
    let name = capture(&patterns::MANDIRI_NAME, text, 1);
    let period_start = capture(&patterns::MANDIRI_PERIOD_RANGE, text, 1);
    let period_end = capture(&patterns::MANDIRI_PERIOD_RANGE, text, 2);
    let branch = capture(&patterns::MANDIRI_BRANCH, text, 1);
    let printed_on = capture(&patterns::MANDIRI_PRINTED_ON, text, 1);
    let account_number = capture(&patterns::MANDIRI_ACCOUNT_NUMBER, text, 1);
    let currency = capture(&patterns::MANDIRI_CURRENCY, text, 1);
    let opening = capture(&patterns::MANDIRI_OPENING_BALANCE, text, 1);
    let incoming = capture(&patterns::MANDIRI_INCOMING, text, 1);
    let outgoing = capture(&patterns::MANDIRI_OUTGOING, text, 1);
    let closing = capture(&patterns::MANDIRI_CLOSING_BALANCE, text, 1);

    let period_year = period_end
        .as_deref()
        .and_then(|end| end.rsplit(' ').next())
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or_else(|| Utc::now().year());
    let period_month = period_end
        .as_deref()
        .map(|end| end.split(' ').collect::<Vec<_>>())
        .filter(|parts| parts.len() == 3)
        .map(|parts| month_from_name(parts[1]))
        .filter(|&m| m > 0);

    let period_line = match (&period_start, &period_end) {
        (Some(start), Some(end)) => format!("Periode/Period : {start} - {end}"),
        _ => "-".to_string(),
    };

    let lines = vec![
        labeled("Nama/Name", &name),
        period_line,
        labeled("Cabang/Branch", &branch),
        labeled("Dicetak pada/Issued on", &printed_on),
        "Tabungan Mandiri".to_string(),
        labeled("Saldo Awal/Initial Balance", &opening),
        labeled("Nomor Rekening/Account Number", &account_number),
        labeled("Mata Uang/Currency", &currency),
        labeled("Dana Masuk/Incoming Transactions", &incoming),
        labeled("Dana Keluar/Outgoing Transactions", &outgoing),
        labeled("Saldo Akhir/Closing Balance", &closing),
    ];

    let metadata = StatementMetadata {
        period_month,
        period_year,
        account_holder: name,
        branch,
        account_number,
        currency,
        opening_balance: opening,
        closing_balance: closing,
        incoming_total: incoming,
        outgoing_total: outgoing,
        printed_on,
    };

    ExtractedHeader { metadata, lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bank;
    use crate::statement::profile::profile_for;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_period_banner_collects_lines_until_period() {
        let text = "PT BANK CENTRAL ASIA TBK HALAMAN : 1 / 2\n\
                    KCU SUDIRMAN\n\
                    REKENING TAHAPAN\n\
                    PERIODE : MARET 2024\n\
                    TANGGAL KETERANGAN\n";
        let header = extract_header(text, profile_for(Bank::Bca));
        assert_eq!(header.metadata.period_year, 2024);
        assert_eq!(header.metadata.period_month, Some(3));
        assert_eq!(
            header.lines,
            vec![
                "PT BANK CENTRAL ASIA TBK",
                "KCU SUDIRMAN",
                "REKENING TAHAPAN",
                "PERIODE : MARET 2024",
            ]
        );
    }

    #[test]
    fn test_non_ascii_month_degrades_month_only() {
        let header = extract_header("PERIODE : Δεκεμβ 2024\n", profile_for(Bank::Bca));
        assert_eq!(header.metadata.period_month, None);
        assert_eq!(header.metadata.period_year, 2024);
        assert_eq!(header.lines, vec!["PERIODE : Δεκεμβ 2024"]);
    }

    #[test]
    fn test_missing_period_falls_back_to_current_year() {
        let header = extract_header("REKENING TAHAPAN\nTANGGAL", profile_for(Bank::Bca));
        assert_eq!(header.metadata.period_year, Utc::now().year());
        assert!(header.lines.is_empty());
    }

    #[test]
    fn test_labeled_fields_extracted() {
        let text = "Nama/Name : BUDI SANTOSO Periode/Period : 01 Mar 2024 - 31 Mar 2024\n\
                    Cabang/Branch : JAKARTA THAMRIN Dicetak pada/Issued on : 01 Apr 2024\n\
                    Nomor Rekening/Account Number : 1234567890\n\
                    Mata Uang/Currency : IDR\n\
                    Saldo Awal/Initial Balance : 1.000.000,00\n\
                    Dana Masuk/Incoming Transactions : 500.000,00\n\
                    Dana Keluar/Outgoing Transactions : 250.000,00\n\
                    Saldo Akhir/Closing Balance : 1.250.000,00\n";
        let header = extract_header(text, profile_for(Bank::Mandiri));
        assert_eq!(header.metadata.account_holder.as_deref(), Some("BUDI SANTOSO"));
        assert_eq!(header.metadata.period_year, 2024);
        assert_eq!(header.metadata.period_month, Some(3));
        assert_eq!(header.metadata.account_number.as_deref(), Some("1234567890"));
        assert_eq!(header.lines.len(), 11);
        assert_eq!(header.lines[0], "Nama/Name : BUDI SANTOSO");
        assert_eq!(header.lines[1], "Periode/Period : 01 Mar 2024 - 31 Mar 2024");
    }

    #[test]
    fn test_labeled_fields_degrade_to_dashes() {
        let header = extract_header("unrelated text", profile_for(Bank::Mandiri));
        assert_eq!(header.lines[0], "Nama/Name : -");
        assert_eq!(header.lines[1], "-");
        assert_eq!(header.metadata.account_holder, None);
        assert_eq!(header.metadata.period_year, Utc::now().year());
    }
}
