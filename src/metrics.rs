use crate::schema::MonthlyFigures;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Profitability and break-even figures derived from one [`MonthlyFigures`].
///
/// Ratios are percentages. Every ratio is exactly `0.0` when sales are not
/// positive, and `bep` is `0.0` when the marginal profit ratio is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub total_labor: f64,
    #[serde(rename = "totalOH")]
    pub total_oh: f64,
    pub total_material: f64,
    /// Labor plus overhead. Depreciation is added separately for the BEP.
    pub total_fixed_cost: f64,

    /// Operating profit before depreciation.
    pub operating_profit: f64,
    pub op_margin: f64,
    pub op_incl_depr: f64,
    pub op_margin_incl_depr: f64,

    pub material_ratio: f64,
    pub labor_ratio: f64,
    pub expense_ratio: f64,
    pub fixed_cost_ratio: f64,
    pub marginal_profit_ratio: f64,

    /// Sales needed to cover fixed costs and depreciation.
    pub bep: f64,
}

/// Percentage of `value` in `sales`, or zero when there are no sales.
fn ratio_of_sales(value: f64, sales: f64) -> f64 {
    if sales > 0.0 {
        value / sales * 100.0
    } else {
        0.0
    }
}

pub fn compute(figures: &MonthlyFigures) -> MetricsRecord {
    let sales = figures.sales;

    let total_labor = figures.admin_labor + figures.mfg_labor;
    let total_oh = figures.admin_oh + figures.mfg_oh;
    let total_material = figures.material_cost;
    let total_fixed_cost = total_labor + total_oh;

    let operating_profit = sales - (figures.material_cost + total_labor + total_oh);
    let op_incl_depr = operating_profit - figures.depreciation;

    let marginal_profit_ratio = ratio_of_sales(sales - figures.material_cost, sales);

    let bep = if marginal_profit_ratio > 0.0 {
        (total_fixed_cost + figures.depreciation) / (marginal_profit_ratio / 100.0)
    } else {
        0.0
    };

    MetricsRecord {
        total_labor,
        total_oh,
        total_material,
        total_fixed_cost,
        operating_profit,
        op_margin: ratio_of_sales(operating_profit, sales),
        op_incl_depr,
        op_margin_incl_depr: ratio_of_sales(op_incl_depr, sales),
        material_ratio: ratio_of_sales(total_material, sales),
        labor_ratio: ratio_of_sales(total_labor, sales),
        expense_ratio: ratio_of_sales(total_oh, sales),
        fixed_cost_ratio: ratio_of_sales(total_fixed_cost, sales),
        marginal_profit_ratio,
        bep,
    }
}
