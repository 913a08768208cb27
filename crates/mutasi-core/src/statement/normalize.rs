//! Row normalization: from a raw cell grid with a column map to a
//! rectangular named frame holding only transaction rows.
//!
//! The steps are order-sensitive and individually total: a malformed
//! row is dropped, never allowed to abort the table.

use tracing::debug;

use crate::models::RawTable;

use super::header::ColumnMap;
use super::profile::{BankProfile, ClassifyStrategy, NoiseScope, PLACEHOLDER_PREFIX};

/// A named, rectangular working table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Frame {
    /// Index of a column by name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column name), empty string when absent.
    pub fn cell(&self, row: usize, name: &str) -> &str {
        self.column(name)
            .and_then(|i| self.rows.get(row).and_then(|r| r.get(i)))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Append an all-empty column unless one with that name exists.
    pub fn ensure_column(&mut self, name: &str) {
        if self.column(name).is_none() {
            self.columns.push(name.to_string());
            for row in &mut self.rows {
                row.push(String::new());
            }
        }
    }

    /// Insert an all-empty column at `index`, shifting later columns.
    pub fn insert_column(&mut self, index: usize, name: &str) {
        let index = index.min(self.columns.len());
        self.columns.insert(index, name.to_string());
        for row in &mut self.rows {
            row.insert(index, String::new());
        }
    }

    /// Remove a column by name, no-op when absent.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(i) = self.column(name) {
            self.columns.remove(i);
            for row in &mut self.rows {
                row.remove(i);
            }
        }
    }

    /// Overwrite every cell of a column through `f(row_index, cell)`.
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(usize, &str) -> String,
    {
        if let Some(i) = self.column(name) {
            for (row_idx, row) in self.rows.iter_mut().enumerate() {
                row[i] = f(row_idx, &row[i]);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the full normalization sequence on one extracted table.
///
/// Returns the renamed, noise-free frame with the issuer's guaranteed
/// columns present. Date reconstruction and amount classification run
/// afterwards on the frame.
pub fn normalize_table(table: &RawTable, map: &ColumnMap, profile: &BankProfile) -> Frame {
    let mut frame = build_frame(table, map);

    drop_empty_placeholders(&mut frame);
    for name in profile.semantic_columns() {
        frame.ensure_column(name);
    }
    drop_noise_rows(&mut frame, profile);
    apply_renames(&mut frame, profile);
    drop_empty_rows(&mut frame, profile);

    debug!(rows = frame.rows.len(), columns = frame.columns.len(), "table normalized");
    frame
}

/// Step 1: name the columns and keep only rows below the header row.
fn build_frame(table: &RawTable, map: &ColumnMap) -> Frame {
    let skip = if map.header_row >= 0 {
        map.header_row as usize + 1
    } else {
        0
    };
    let width = map.names.len();
    let rows = table
        .rows
        .iter()
        .skip(skip)
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(width).cloned().collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();
    Frame { columns: map.names.clone(), rows }
}

/// Step 2: drop placeholder columns that carry no data at all.
/// Placeholders with content stay as extra positional data.
fn drop_empty_placeholders(frame: &mut Frame) {
    let doomed: Vec<String> = frame
        .columns
        .iter()
        .enumerate()
        .filter(|(i, name)| {
            name.starts_with(PLACEHOLDER_PREFIX)
                && frame.rows.iter().all(|r| r[*i].trim().is_empty())
        })
        .map(|(_, name)| name.clone())
        .collect();
    for name in doomed {
        frame.drop_column(&name);
    }
}

/// Step 4: drop non-transactional rows by the issuer denylist.
pub fn drop_noise_rows(frame: &mut Frame, profile: &BankProfile) {
    match profile.noise_scope {
        NoiseScope::DateColumn => {
            // The date column is addressed by its semantic name before
            // the rename step and by its final title after it.
            let Some(idx) = frame
                .column(profile.date_column)
                .or_else(|| frame.column("TANGGAL"))
            else {
                return;
            };
            frame.rows.retain(|row| !profile.noise.is_match(&row[idx]));
        }
        NoiseScope::AnyColumn => {
            frame
                .rows
                .retain(|row| !row.iter().any(|cell| profile.noise.is_match(cell)));
        }
    }
}

/// Step 5: rename to the issuer's final schema titles.
///
/// When the layout has no separate primary-description column (narrow
/// table fragments), the secondary description is promoted to primary
/// so the same slot always carries the transaction text.
fn apply_renames(frame: &mut Frame, profile: &BankProfile) {
    for name in &mut frame.columns {
        if let Some((_, to)) = profile.rename.iter().find(|(from, _)| from == name) {
            *name = (*to).to_string();
        }
    }

    if let ClassifyStrategy::DescriptionKeywords { description_column, .. } = profile.classify {
        if frame.column(description_column).is_none() {
            if let Some(i) = frame.column("Keterangan Tambahan") {
                frame.columns[i] = description_column.to_string();
            }
        }
    }
}

/// Step 6: drop rows that are empty across every schema-titled column.
pub fn drop_empty_rows(frame: &mut Frame, profile: &BankProfile) {
    let schema_indices: Vec<usize> = profile
        .rename
        .iter()
        .filter_map(|(_, to)| frame.column(to))
        .collect();
    if schema_indices.is_empty() {
        return;
    }
    frame
        .rows
        .retain(|row| schema_indices.iter().any(|&i| !row[i].trim().is_empty()));
}
