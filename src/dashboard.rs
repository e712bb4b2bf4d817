//! Derived view model behind the dashboard: per-month chart rows, summary
//! cards and the metric-by-month pivot table.
//!
//! Nothing here is cached. Every call recomputes from the dataset and the two
//! selectors, which is cheap at 12 months by 2 series.

use crate::aggregation::{apply_view_mode, summarize_figures};
use crate::metrics::{compute, MetricsRecord};
use crate::schema::{month_label, Dataset, DisplayPeriod, MonthlyFigures, ViewMode};
use serde::{Deserialize, Serialize};

/// One displayed month, in the selected view mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month_idx: usize,
    pub label: String,
    pub target_sales: f64,
    pub actual_sales: f64,
    pub target_bep: f64,
    pub actual_bep: f64,
    /// Metrics of the actual series for this month.
    pub metrics: MetricsRecord,
}

impl MonthRow {
    pub fn sales_on_target(&self) -> bool {
        self.actual_sales >= self.target_sales
    }
}

/// Period totals for the headline cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCards {
    pub actual_figures: MonthlyFigures,
    pub actual: MetricsRecord,
    pub target_figures: MonthlyFigures,
    pub target: MetricsRecord,
}

impl SummaryCards {
    pub fn build(dataset: &Dataset, mode: ViewMode, period: DisplayPeriod) -> Self {
        let actual_figures = summarize_figures(&dataset.actual, period.months(), mode);
        let target_figures = summarize_figures(&dataset.target, period.months(), mode);
        Self {
            actual: compute(&actual_figures),
            actual_figures,
            target: compute(&target_figures),
            target_figures,
        }
    }

    /// Actual sales as a percentage of target sales, 0 without a target.
    pub fn sales_achievement(&self) -> f64 {
        if self.target_figures.sales > 0.0 {
            self.actual_figures.sales / self.target_figures.sales * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PivotMetric {
    OperatingProfit,
    OpMargin,
    OpInclDepr,
    OpMarginInclDepr,
    MaterialRatio,
    LaborRatio,
    ExpenseRatio,
    MarginalProfitRatio,
    Bep,
}

impl PivotMetric {
    pub const ALL: [PivotMetric; 9] = [
        PivotMetric::OperatingProfit,
        PivotMetric::OpMargin,
        PivotMetric::OpInclDepr,
        PivotMetric::OpMarginInclDepr,
        PivotMetric::MaterialRatio,
        PivotMetric::LaborRatio,
        PivotMetric::ExpenseRatio,
        PivotMetric::MarginalProfitRatio,
        PivotMetric::Bep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PivotMetric::OperatingProfit => "Operating profit (before depr.)",
            PivotMetric::OpMargin => "Operating margin",
            PivotMetric::OpInclDepr => "Operating profit (after depr.)",
            PivotMetric::OpMarginInclDepr => "Operating margin (after depr.)",
            PivotMetric::MaterialRatio => "Material ratio",
            PivotMetric::LaborRatio => "Labor ratio",
            PivotMetric::ExpenseRatio => "Expense ratio",
            PivotMetric::MarginalProfitRatio => "Marginal profit ratio",
            PivotMetric::Bep => "Break-even sales (BEP)",
        }
    }

    pub fn is_percent(&self) -> bool {
        !matches!(
            self,
            PivotMetric::OperatingProfit | PivotMetric::OpInclDepr | PivotMetric::Bep
        )
    }

    pub fn value(&self, metrics: &MetricsRecord) -> f64 {
        match self {
            PivotMetric::OperatingProfit => metrics.operating_profit,
            PivotMetric::OpMargin => metrics.op_margin,
            PivotMetric::OpInclDepr => metrics.op_incl_depr,
            PivotMetric::OpMarginInclDepr => metrics.op_margin_incl_depr,
            PivotMetric::MaterialRatio => metrics.material_ratio,
            PivotMetric::LaborRatio => metrics.labor_ratio,
            PivotMetric::ExpenseRatio => metrics.expense_ratio,
            PivotMetric::MarginalProfitRatio => metrics.marginal_profit_ratio,
            PivotMetric::Bep => metrics.bep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub metric: PivotMetric,
    /// One value per displayed month, in month order.
    pub values: Vec<f64>,
}

pub fn month_rows(dataset: &Dataset, mode: ViewMode, period: DisplayPeriod) -> Vec<MonthRow> {
    let target = apply_view_mode(&dataset.target, mode);
    let actual = apply_view_mode(&dataset.actual, mode);

    period
        .months()
        .map(|idx| {
            let target_metrics = compute(&target[idx]);
            let actual_metrics = compute(&actual[idx]);
            MonthRow {
                month_idx: idx,
                label: month_label(idx),
                target_sales: target[idx].sales,
                actual_sales: actual[idx].sales,
                target_bep: target_metrics.bep,
                actual_bep: actual_metrics.bep,
                metrics: actual_metrics,
            }
        })
        .collect()
}

pub fn pivot_table(rows: &[MonthRow]) -> Vec<PivotRow> {
    PivotMetric::ALL
        .iter()
        .map(|&metric| PivotRow {
            metric,
            values: rows.iter().map(|row| metric.value(&row.metrics)).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub mode: ViewMode,
    pub period: DisplayPeriod,
    pub months: Vec<MonthRow>,
    pub summary: SummaryCards,
    pub pivot: Vec<PivotRow>,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, mode: ViewMode, period: DisplayPeriod) -> Self {
        let months = month_rows(dataset, mode, period);
        let pivot = pivot_table(&months);
        Self {
            mode,
            period,
            summary: SummaryCards::build(dataset, mode, period),
            months,
            pivot,
        }
    }

    pub fn month_labels(&self) -> Vec<&str> {
        self.months.iter().map(|row| row.label.as_str()).collect()
    }
}
