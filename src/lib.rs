//! # P&L Dashboard
//!
//! Monthly profit & loss planning: target vs. actual figures for one year,
//! turned into margins, cost ratios and a break-even point.
//!
//! ## Core Concepts
//!
//! - **Monthly figures**: seven raw inputs per month (sales, material cost, two labor
//!   lines, two overhead lines, depreciation) for a target and an actual series
//! - **Metrics**: operating profit before/after depreciation, cost ratios, marginal
//!   profit ratio and break-even sales; ratios are 0 whenever sales are not positive
//! - **Cumulative view**: every month shows the year-to-date running total
//! - **Period summaries**: sums in the monthly view, the YTD figure at the end of
//!   the range in the cumulative view
//! - **Share tokens**: the whole dataset packed into a URL-safe string
//!
//! ## Example
//!
//! ```rust
//! use pl_dashboard::*;
//!
//! let mut dataset = Dataset::zeroed();
//! dataset.actual[0] = MonthlyFigures {
//!     sales: 1000.0,
//!     material_cost: 300.0,
//!     admin_labor: 100.0,
//!     mfg_labor: 100.0,
//!     admin_oh: 50.0,
//!     mfg_oh: 50.0,
//!     depreciation: 20.0,
//! };
//!
//! let metrics = compute(&dataset.actual[0]);
//! assert_eq!(metrics.operating_profit, 400.0);
//!
//! let h1 = summarize(&dataset.actual, DisplayPeriod::FirstHalf.months(), ViewMode::Cumulative);
//! assert_eq!(h1.operating_profit, 400.0);
//!
//! let token = encode(&dataset);
//! assert_eq!(decode(&token).unwrap(), dataset);
//! ```

pub mod aggregation;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod paste;
pub mod schema;
pub mod session;
pub mod share;
pub mod storage;

pub use aggregation::{apply_view_mode, cumulative, fieldwise_sum, summarize, summarize_figures};
pub use config::{DashboardConfig, DEFAULT_STORAGE_KEY};
pub use dashboard::{
    month_rows, pivot_table, DashboardView, MonthRow, PivotMetric, PivotRow, SummaryCards,
};
pub use error::{DashboardError, Result};
pub use metrics::{compute, MetricsRecord};
pub use paste::{apply_paste, parse_cell, parse_grid, set_cell, PasteAnchor, PasteLayout, PasteOutcome};
pub use schema::*;
pub use session::{DashboardSession, DataSource};
pub use share::{decode, encode, ShareLink, DEFAULT_SHARE_PARAM};
pub use storage::{load_or_default, DatasetStore, FileStore, MemoryStore};
