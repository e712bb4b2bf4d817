use crate::error::{DashboardError, Result};
use crate::schema::{Dataset, FigureField, SeriesKind, MONTHS};
use log::debug;

/// The ordered rows of the editing grid. Columns are always the 12 months.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteLayout {
    rows: Vec<(SeriesKind, FigureField)>,
}

impl PasteLayout {
    pub fn new(rows: Vec<(SeriesKind, FigureField)>) -> Self {
        Self { rows }
    }

    /// The seven field rows of a single series.
    pub fn series(kind: SeriesKind) -> Self {
        Self::new(FigureField::ALL.iter().map(|&field| (kind, field)).collect())
    }

    /// Every field twice: its target row followed by its actual row.
    pub fn field_by_series() -> Self {
        Self::new(
            FigureField::ALL
                .iter()
                .flat_map(|&field| SeriesKind::ALL.map(|kind| (kind, field)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<(SeriesKind, FigureField)> {
        self.rows.get(idx).copied()
    }
}

/// Top-left cell the pasted block is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasteAnchor {
    pub month: usize,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasteOutcome {
    pub dataset: Dataset,
    pub applied: usize,
    pub dropped: usize,
}

/// Coerces free-form cell text to a number.
///
/// Everything but digits, `.` and `-` is stripped (so `"1,250"` reads as
/// 1250), then the longest leading number is taken. Anything unreadable, or
/// too large to hold as a finite number, is 0.
pub fn parse_cell(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in cleaned.char_indices() {
        match c {
            '-' if idx == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => {}
            _ => break,
        }
        end = idx + 1;
    }

    match cleaned[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Splits tab/newline separated text into rows of numbers. Blank lines are
/// skipped; rows may have different lengths.
pub fn parse_grid(text: &str) -> Vec<Vec<f64>> {
    text.split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(parse_cell).collect())
        .collect()
}

/// Writes a pasted block into a copy of `dataset`.
///
/// Cells falling right of December or below the last layout row are dropped,
/// including any whose position overflows.
pub fn apply_paste(
    dataset: &Dataset,
    layout: &PasteLayout,
    anchor: PasteAnchor,
    text: &str,
) -> PasteOutcome {
    let grid = parse_grid(text);
    let mut next = dataset.clone();
    let mut applied = 0;
    let mut dropped = 0;

    for (row_offset, cells) in grid.iter().enumerate() {
        let target_row = anchor
            .row
            .checked_add(row_offset)
            .and_then(|row| layout.row(row));
        for (col_offset, &value) in cells.iter().enumerate() {
            let month = anchor.month.checked_add(col_offset);
            match (target_row, month) {
                (Some((kind, field)), Some(month)) if month < MONTHS => {
                    next.series_mut(kind)[month].set(field, value);
                    applied += 1;
                }
                _ => dropped += 1,
            }
        }
    }

    debug!(
        "Applied pasted block at month {} row {}: {} cells written, {} dropped",
        anchor.month, anchor.row, applied, dropped
    );

    PasteOutcome {
        dataset: next,
        applied,
        dropped,
    }
}

/// Sets a single typed cell, returning the updated copy.
pub fn set_cell(
    dataset: &Dataset,
    kind: SeriesKind,
    month: usize,
    field: FigureField,
    raw: &str,
) -> Result<Dataset> {
    if month >= MONTHS {
        return Err(DashboardError::InvalidMonthIndex(month));
    }

    let mut next = dataset.clone();
    next.series_mut(kind)[month].set(field, parse_cell(raw));
    Ok(next)
}
