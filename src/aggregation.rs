use crate::metrics::{compute, MetricsRecord};
use crate::schema::{MonthlyFigures, Series, ViewMode, MONTHS};
use log::debug;
use std::ops::Range;

/// Field-wise sum of every month in `months`.
pub fn fieldwise_sum(months: &[MonthlyFigures]) -> MonthlyFigures {
    months
        .iter()
        .fold(MonthlyFigures::default(), |acc, month| acc + *month)
}

/// Converts a series of monthly amounts into year-to-date running totals.
///
/// `output[i]` is the field-wise sum of `series[0..=i]`. Negative entries
/// make totals go down; that is accepted as-is.
pub fn cumulative(series: &Series) -> Series {
    let mut running_total = MonthlyFigures::default();
    series.map(|month| {
        running_total = running_total + month;
        running_total
    })
}

/// Figures summarizing `range` of `series` for the given view mode.
///
/// - `Monthly`: the field-wise sum of the months in range.
/// - `Cumulative`: the YTD total as of the last month in range. Cumulative
///   values already include every earlier month, so they are read, not summed.
///
/// The range is clamped to the 12 months. A monthly summary of an empty range
/// is zero; a cumulative one is zero only when the range ends at January's start.
pub fn summarize_figures(series: &Series, range: Range<usize>, mode: ViewMode) -> MonthlyFigures {
    let start = range.start.min(MONTHS);
    let end = range.end.min(MONTHS);

    match mode {
        ViewMode::Monthly if start >= end => {
            debug!("Empty summary range {:?}, returning zeros", range);
            MonthlyFigures::default()
        }
        ViewMode::Monthly => fieldwise_sum(&series[start..end]),
        ViewMode::Cumulative => match end.checked_sub(1) {
            Some(last) => cumulative(series)[last],
            None => {
                debug!("Summary range {:?} ends before January, returning zeros", range);
                MonthlyFigures::default()
            }
        },
    }
}

pub fn summarize(series: &Series, range: Range<usize>, mode: ViewMode) -> MetricsRecord {
    compute(&summarize_figures(series, range, mode))
}

/// Applies the view mode to a whole series: unchanged for `Monthly`, running
/// totals for `Cumulative`.
pub fn apply_view_mode(series: &Series, mode: ViewMode) -> Series {
    match mode {
        ViewMode::Monthly => *series,
        ViewMode::Cumulative => cumulative(series),
    }
}
