use chrono::Month;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Add, Range};

/// Number of calendar months held by every series.
pub const MONTHS: usize = 12;

/// One month of raw inputs for one series (target or actual).
///
/// Values are not validated: negative entries are accepted as typed. Missing
/// or `null` fields read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyFigures {
    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Sales revenue for the month")]
    pub sales: f64,

    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Material cost, the only cost treated as variable with sales")]
    pub material_cost: f64,

    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Administrative (SG&A) labor cost")]
    pub admin_labor: f64,

    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Manufacturing labor cost")]
    pub mfg_labor: f64,

    #[serde(rename = "adminOH", deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Administrative (SG&A) overhead expenses")]
    pub admin_oh: f64,

    #[serde(rename = "mfgOH", deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Manufacturing overhead expenses")]
    pub mfg_oh: f64,

    #[serde(deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64", description = "Depreciation charge, excluded from operating profit before depreciation")]
    pub depreciation: f64,
}

impl MonthlyFigures {
    pub fn get(&self, field: FigureField) -> f64 {
        match field {
            FigureField::Sales => self.sales,
            FigureField::MaterialCost => self.material_cost,
            FigureField::AdminLabor => self.admin_labor,
            FigureField::MfgLabor => self.mfg_labor,
            FigureField::AdminOh => self.admin_oh,
            FigureField::MfgOh => self.mfg_oh,
            FigureField::Depreciation => self.depreciation,
        }
    }

    pub fn set(&mut self, field: FigureField, value: f64) {
        let slot = match field {
            FigureField::Sales => &mut self.sales,
            FigureField::MaterialCost => &mut self.material_cost,
            FigureField::AdminLabor => &mut self.admin_labor,
            FigureField::MfgLabor => &mut self.mfg_labor,
            FigureField::AdminOh => &mut self.admin_oh,
            FigureField::MfgOh => &mut self.mfg_oh,
            FigureField::Depreciation => &mut self.depreciation,
        };
        *slot = value;
    }

    /// Values in the fixed [`FigureField::ALL`] order.
    pub fn to_array(&self) -> [f64; FigureField::COUNT] {
        FigureField::ALL.map(|field| self.get(field))
    }

    pub fn from_array(values: [f64; FigureField::COUNT]) -> Self {
        let mut figures = Self::default();
        for (field, value) in FigureField::ALL.into_iter().zip(values) {
            figures.set(field, value);
        }
        figures
    }
}

impl Add for MonthlyFigures {
    type Output = MonthlyFigures;

    fn add(self, other: MonthlyFigures) -> MonthlyFigures {
        MonthlyFigures {
            sales: self.sales + other.sales,
            material_cost: self.material_cost + other.material_cost,
            admin_labor: self.admin_labor + other.admin_labor,
            mfg_labor: self.mfg_labor + other.mfg_labor,
            admin_oh: self.admin_oh + other.admin_oh,
            mfg_oh: self.mfg_oh + other.mfg_oh,
            depreciation: self.depreciation + other.depreciation,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FigureField {
    Sales,
    MaterialCost,
    AdminLabor,
    MfgLabor,
    #[serde(rename = "adminOH")]
    AdminOh,
    #[serde(rename = "mfgOH")]
    MfgOh,
    Depreciation,
}

impl FigureField {
    pub const COUNT: usize = 7;

    /// Canonical field order shared by the editor rows and the share token layout.
    pub const ALL: [FigureField; FigureField::COUNT] = [
        FigureField::Sales,
        FigureField::MaterialCost,
        FigureField::AdminLabor,
        FigureField::MfgLabor,
        FigureField::AdminOh,
        FigureField::MfgOh,
        FigureField::Depreciation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FigureField::Sales => "Sales",
            FigureField::MaterialCost => "Material cost",
            FigureField::AdminLabor => "Admin labor",
            FigureField::MfgLabor => "Mfg labor",
            FigureField::AdminOh => "Admin overhead",
            FigureField::MfgOh => "Mfg overhead",
            FigureField::Depreciation => "Depreciation",
        }
    }

    pub fn index(&self) -> usize {
        FigureField::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    #[schemars(description = "Planned figures set at the start of the year")]
    Target,

    #[schemars(description = "Realized monthly figures (per-month amounts, not YTD)")]
    Actual,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Target, SeriesKind::Actual];

    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::Target => "Target",
            SeriesKind::Actual => "Actual",
        }
    }
}

pub type Series = [MonthlyFigures; MONTHS];

/// The full year of target and actual figures. This is the only mutable
/// state in the application and is always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    #[serde(deserialize_with = "deserialize_series")]
    #[schemars(with = "Series", description = "Exactly 12 months of planned figures, January first")]
    pub target: Series,

    #[serde(deserialize_with = "deserialize_series")]
    #[schemars(with = "Series", description = "Exactly 12 months of realized figures, January first")]
    pub actual: Series,
}

impl Dataset {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn series(&self, kind: SeriesKind) -> &Series {
        match kind {
            SeriesKind::Target => &self.target,
            SeriesKind::Actual => &self.actual,
        }
    }

    pub fn series_mut(&mut self, kind: SeriesKind) -> &mut Series {
        match kind {
            SeriesKind::Target => &mut self.target,
            SeriesKind::Actual => &mut self.actual,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Dataset)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Accepts up to 12 months and zero-fills the rest, so a series is never
/// partially populated.
fn deserialize_series<'de, D>(deserializer: D) -> Result<Series, D::Error>
where
    D: Deserializer<'de>,
{
    let months = Vec::<MonthlyFigures>::deserialize(deserializer)?;
    if months.len() > MONTHS {
        return Err(serde::de::Error::invalid_length(
            months.len(),
            &"at most 12 months",
        ));
    }

    let mut series = Series::default();
    for (slot, month) in series.iter_mut().zip(months) {
        *slot = month;
    }
    Ok(series)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Each month shows only that month's amounts.
    #[default]
    Monthly,
    /// Each month shows the running total from January.
    Cumulative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum DisplayPeriod {
    FirstHalf,
    SecondHalf,
    #[default]
    FullYear,
}

impl DisplayPeriod {
    /// Half-open month index range covered by the period.
    pub fn months(&self) -> Range<usize> {
        match self {
            DisplayPeriod::FirstHalf => 0..6,
            DisplayPeriod::SecondHalf => 6..12,
            DisplayPeriod::FullYear => 0..MONTHS,
        }
    }
}

/// English month name for a 0-based month index.
pub fn month_label(month_idx: usize) -> String {
    month_idx
        .checked_add(1)
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("Month {}", month_idx as u128 + 1))
}
