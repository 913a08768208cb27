//! Rule-based parsers shared by the issuer pipelines.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{parse_amount, parse_signed_amount, render_fixed2, render_plain};
pub use dates::{reconstruct_day_month, reconstruct_day_month_name};
pub use patterns::*;

/// Outcome of parsing one cell.
///
/// Distinguishes a cell that was genuinely empty in the source from one
/// that carried content the rules could not parse. Both render as the
/// empty string downstream, but tests and consumers can tell them apart
/// without re-parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome<T> {
    /// Parsed successfully.
    Value(T),
    /// Cell was empty in the source.
    Missing,
    /// Cell had content that failed to parse.
    Unparsed,
}

impl<T> FieldOutcome<T> {
    pub fn value(self) -> Option<T> {
        match self {
            FieldOutcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, FieldOutcome::Unparsed)
    }
}
