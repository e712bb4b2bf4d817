//! Compact, URL-safe encoding of a whole [`Dataset`] for shareable links.
//!
//! The token is the JSON array `[target, actual]`, each series being 12 rows
//! of 7 numbers in [`FigureField::ALL`] order, encoded as unpadded URL-safe
//! base64. Numbers pass through `serde_json` unchanged, so finite values
//! round-trip exactly. Non-finite values are written as `null` and read back
//! as 0.

use crate::error::{DashboardError, Result};
use crate::schema::{Dataset, FigureField, MonthlyFigures, Series, SeriesKind, MONTHS};
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine;
use log::debug;
use serde_json::Value;

/// Query parameter carrying the token unless configured otherwise.
pub const DEFAULT_SHARE_PARAM: &str = "view";

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn flatten(series: &Series) -> Value {
    series
        .iter()
        .map(|month| Value::from(month.to_array().to_vec()))
        .collect()
}

pub fn encode(dataset: &Dataset) -> String {
    let payload = Value::Array(vec![flatten(&dataset.target), flatten(&dataset.actual)]);
    let json = payload.to_string();
    let token = TOKEN_ENGINE.encode(json.as_bytes());
    debug!(
        "Encoded dataset share token: {} bytes of JSON -> {} chars",
        json.len(),
        token.len()
    );
    token
}

pub fn decode(token: &str) -> Result<Dataset> {
    let bytes = TOKEN_ENGINE.decode(token.trim())?;
    let json = String::from_utf8(bytes)
        .map_err(|e| DashboardError::InvalidShareToken(format!("token is not UTF-8 text: {}", e)))?;

    let payload: Vec<Vec<Vec<Option<f64>>>> = serde_json::from_str(&json)?;
    if payload.len() != SeriesKind::ALL.len() {
        return Err(DashboardError::InvalidShareToken(format!(
            "expected {} series, got {}",
            SeriesKind::ALL.len(),
            payload.len()
        )));
    }

    let mut dataset = Dataset::zeroed();
    for (kind, rows) in SeriesKind::ALL.into_iter().zip(payload) {
        *dataset.series_mut(kind) = rebuild_series(kind, rows)?;
    }

    debug!("Decoded dataset from {} char share token", token.len());
    Ok(dataset)
}

fn rebuild_series(kind: SeriesKind, rows: Vec<Vec<Option<f64>>>) -> Result<Series> {
    if rows.len() != MONTHS {
        return Err(DashboardError::InvalidDatasetShape {
            series: kind.label().to_string(),
            details: format!("expected {} months, got {}", MONTHS, rows.len()),
        });
    }

    let mut series = Series::default();
    for (month_idx, (slot, row)) in series.iter_mut().zip(rows).enumerate() {
        let values: [Option<f64>; FigureField::COUNT] =
            row.try_into()
                .map_err(|row: Vec<Option<f64>>| DashboardError::InvalidDatasetShape {
                    series: kind.label().to_string(),
                    details: format!(
                        "month {} has {} values, expected {}",
                        month_idx,
                        row.len(),
                        FigureField::COUNT
                    ),
                })?;
        *slot = MonthlyFigures::from_array(values.map(|value| value.unwrap_or(0.0)));
    }
    Ok(series)
}

/// Helpers for carrying a share token in a URL query string.
pub struct ShareLink;

impl ShareLink {
    /// Appends `param=token` to `base_url`.
    pub fn build(base_url: &str, token: &str, param: &str) -> String {
        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", base_url, separator, param, token)
    }

    /// Extracts the value of `param` from a query string or full URL.
    ///
    /// Returns `Some("")` when the parameter is present but empty, which still
    /// counts as a shared view.
    pub fn token_from_query(query: &str, param: &str) -> Option<String> {
        let query = match query.split_once('?') {
            Some((_, q)) => q,
            None => query,
        };
        let query = query.split('#').next().unwrap_or_default();

        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| match pair.split_once('=') {
                Some((key, value)) if key == param => Some(value.to_string()),
                None if pair == param => Some(String::new()),
                _ => None,
            })
    }
}
