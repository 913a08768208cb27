//! Data model for statement conversion.

pub mod config;
pub mod statement;

pub use config::ConvertConfig;
pub use statement::{
    Align, Bank, ColumnSpec, ExportFormat, Field, NormalizedStatement, RawPage, RawTable,
    StatementMetadata, TransactionRecord,
};
