//! Configuration for the conversion pipeline.

use serde::{Deserialize, Serialize};

/// Conversion configuration.
///
/// Holds the heuristic policy constants as an immutable value passed
/// into the pipeline, so every request is self-contained and testable
/// per issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// How many leading rows of a raw table are scanned for the header
    /// row. Header rows sit near the top of a table fragment; scanning
    /// deeper risks matching data rows that contain keyword substrings.
    pub header_scan_rows: usize,

    /// Classify a keyword-tagged amount as outflow when the description
    /// is blank. Observed issuer convention, not a guess; overridable
    /// here pending validation against a larger statement corpus.
    pub blank_description_is_outflow: bool,

    /// Spreadsheet width cap for the date column, in characters.
    pub date_column_width_cap: f64,

    /// Minimum spreadsheet column width, in characters.
    pub min_column_width: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 5,
            blank_description_is_outflow: true,
            date_column_width_cap: 15.0,
            min_column_width: 3.0,
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
