//! Statement normalization: from raw page grids to ordered
//! transaction records.

pub mod classify;
pub mod header;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod rules;

pub use header::{locate_header, ColumnMap};
pub use metadata::{extract_header, ExtractedHeader};
pub use normalize::Frame;
pub use pipeline::{convert_document, StatementConverter};
pub use profile::{profile_for, BankProfile, ClassifyStrategy, DateStrategy};
