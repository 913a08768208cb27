//! Monetary amount parsing for statement cells.
//!
//! Statements mix two separator conventions: `150.000,00` (dot
//! thousands, comma decimal) and `150,000.00` (the reverse). The last
//! separator in the cell decides which one is the decimal point.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Sign carried by a signed amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Parse a statement amount, stripping thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(c), None) => {
            // Lone comma: decimal when exactly two digits follow,
            // thousands separator otherwise.
            if cleaned.len() - c == 3 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, Some(d)) => {
            if cleaned.len() - d == 3 {
                cleaned
            } else {
                cleaned.replace('.', "")
            }
        }
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a signed amount cell, returning the explicit sign (if any) and
/// the magnitude.
pub fn parse_signed_amount(s: &str) -> (Option<Sign>, Option<Decimal>) {
    let sign = if s.contains('+') {
        Some(Sign::Plus)
    } else if s.contains('-') {
        Some(Sign::Minus)
    } else {
        None
    };
    (sign, parse_amount(s))
}

/// Render an amount with trailing zeros trimmed ("150000").
pub fn render_plain(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Render an amount with exactly two decimal places ("75000.00").
pub fn render_fixed2(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_dot_thousands() {
        assert_eq!(
            parse_amount("150.000,00"),
            Some(Decimal::from_str("150000.00").unwrap())
        );
        assert_eq!(
            parse_amount("2.150.000,00"),
            Some(Decimal::from_str("2150000.00").unwrap())
        );
    }

    #[test]
    fn test_parse_comma_thousands() {
        assert_eq!(
            parse_amount("150,000.00"),
            Some(Decimal::from_str("150000.00").unwrap())
        );
        assert_eq!(
            parse_amount("1,234,567.89"),
            Some(Decimal::from_str("1234567.89").unwrap())
        );
    }

    #[test]
    fn test_parse_single_separator() {
        assert_eq!(parse_amount("75,50"), Some(Decimal::from_str("75.50").unwrap()));
        assert_eq!(parse_amount("75.500"), Some(Decimal::from_str("75500").unwrap()));
        assert_eq!(parse_amount("1000"), Some(Decimal::from_str("1000").unwrap()));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("TRANSFER"), None);
        assert_eq!(parse_amount("-"), None);
    }

    #[test]
    fn test_parse_signed() {
        let (sign, amount) = parse_signed_amount("-75.000,00");
        assert_eq!(sign, Some(Sign::Minus));
        assert_eq!(amount, Some(Decimal::from_str("75000.00").unwrap()));

        let (sign, amount) = parse_signed_amount("+1.000,00");
        assert_eq!(sign, Some(Sign::Plus));
        assert_eq!(amount, Some(Decimal::from_str("1000.00").unwrap()));

        let (sign, _) = parse_signed_amount("500,00");
        assert_eq!(sign, None);
    }

    #[test]
    fn test_render() {
        let amount = Decimal::from_str("150000.00").unwrap();
        assert_eq!(render_plain(amount), "150000");
        assert_eq!(render_fixed2(amount), "150000.00");

        let amount = Decimal::from_str("75000.5").unwrap();
        assert_eq!(render_fixed2(amount), "75000.50");
    }
}
