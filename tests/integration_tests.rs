use pl_dashboard::*;

fn export_pivot_to_csv(view: &DashboardView) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Metric".to_string()];
    header.extend(view.month_labels().iter().map(|label| label.to_string()));
    writer.write_record(&header)?;

    for row in &view.pivot {
        let mut record = vec![row.metric.label().to_string()];
        for value in &row.values {
            if row.metric.is_percent() {
                record.push(format!("{:.1}%", value));
            } else {
                record.push(format!("{:.0}", value));
            }
        }
        writer.write_record(&record)?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

/// A machine shop with flat plans and a slow first quarter.
fn machine_shop() -> Dataset {
    let mut dataset = Dataset::zeroed();
    for month in 0..MONTHS {
        dataset.target[month] = MonthlyFigures {
            sales: 50_000_000.0,
            material_cost: 20_000_000.0,
            admin_labor: 6_000_000.0,
            mfg_labor: 9_000_000.0,
            admin_oh: 2_000_000.0,
            mfg_oh: 3_000_000.0,
            depreciation: 1_500_000.0,
        };

        let ramp = if month < 3 { 0.6 } else { 1.05 };
        dataset.actual[month] = MonthlyFigures {
            sales: 50_000_000.0 * ramp,
            material_cost: 20_000_000.0 * ramp,
            admin_labor: 6_200_000.0,
            mfg_labor: 9_100_000.0,
            admin_oh: 2_100_000.0,
            mfg_oh: 2_900_000.0,
            depreciation: 1_500_000.0,
        };
    }
    dataset
}

#[test]
fn test_reference_month_metrics() {
    let figures = MonthlyFigures {
        sales: 1000.0,
        material_cost: 300.0,
        admin_labor: 100.0,
        mfg_labor: 100.0,
        admin_oh: 50.0,
        mfg_oh: 50.0,
        depreciation: 20.0,
    };
    let metrics = compute(&figures);

    assert_close(metrics.total_labor, 200.0);
    assert_close(metrics.total_oh, 100.0);
    assert_close(metrics.operating_profit, 400.0);
    assert_close(metrics.op_margin, 40.0);
    assert_close(metrics.op_incl_depr, 380.0);
    assert_close(metrics.op_margin_incl_depr, 38.0);
    assert_close(metrics.marginal_profit_ratio, 70.0);
    assert_close(metrics.bep, 457.142857142857);
}

#[test]
fn test_machine_shop_full_year() {
    let dataset = machine_shop();
    let view = DashboardView::build(&dataset, ViewMode::Monthly, DisplayPeriod::FullYear);

    assert_eq!(view.months.len(), 12);
    assert!(!view.months[0].sales_on_target());
    assert!(view.months[6].sales_on_target());

    // Q1 is loss-making before depreciation, the rest of the year is not.
    assert!(view.months[0].metrics.operating_profit < 0.0);
    assert!(view.months[11].metrics.operating_profit > 0.0);

    // Marginal profit ratio is 60% every month, so BEP only depends on fixed costs.
    for row in &view.months {
        assert_close(row.metrics.marginal_profit_ratio, 60.0);
        assert_close(row.actual_bep, (6_200_000.0 + 9_100_000.0 + 2_100_000.0 + 2_900_000.0 + 1_500_000.0) / 0.6);
        assert_close(row.target_bep, 21_500_000.0 / 0.6);
    }

    let summary = &view.summary;
    assert_close(summary.target_figures.sales, 600_000_000.0);
    assert_close(summary.actual_figures.sales, 50_000_000.0 * (3.0 * 0.6 + 9.0 * 1.05));
    assert_eq!(summary.actual, compute(&fieldwise_sum(&dataset.actual)));

    let csv = export_pivot_to_csv(&view).unwrap();
    println!("{}", csv);
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Metric,January,February"));
    assert_eq!(lines.count(), PivotMetric::ALL.len());
    assert!(csv.contains("Marginal profit ratio,60.0%"));
}

#[test]
fn test_cumulative_view_reads_ytd_not_sums() {
    let dataset = machine_shop();
    let ytd = cumulative(&dataset.actual);

    let h1 = SummaryCards::build(&dataset, ViewMode::Cumulative, DisplayPeriod::FirstHalf);
    assert_eq!(h1.actual, compute(&ytd[5]));
    assert_ne!(h1.actual, compute(&fieldwise_sum(&ytd[0..6])));

    let h2 = SummaryCards::build(&dataset, ViewMode::Cumulative, DisplayPeriod::SecondHalf);
    assert_eq!(h2.actual_figures, ytd[11]);
    assert_close(h2.actual_figures.sales, fieldwise_sum(&dataset.actual).sales);

    let rows = month_rows(&dataset, ViewMode::Cumulative, DisplayPeriod::SecondHalf);
    assert_eq!(rows.len(), 6);
    assert_close(rows[0].target_sales, 7.0 * 50_000_000.0);

    // Q1 losses are absorbed by April in YTD terms.
    assert!(compute(&ytd[2]).operating_profit < 0.0);
    assert!(compute(&ytd[3]).operating_profit > 0.0);
}

#[test]
fn test_degenerate_months_never_produce_nan() {
    let mut dataset = Dataset::zeroed();
    dataset.actual[0] = MonthlyFigures {
        sales: 0.0,
        material_cost: 100.0,
        ..Default::default()
    };
    dataset.actual[1] = MonthlyFigures {
        sales: 100.0,
        material_cost: 250.0,
        admin_labor: 10.0,
        ..Default::default()
    };
    dataset.actual[2] = MonthlyFigures {
        sales: -500.0,
        ..Default::default()
    };

    let view = DashboardView::build(&dataset, ViewMode::Monthly, DisplayPeriod::FullYear);
    for row in &view.pivot {
        assert!(row.values.iter().all(|v| v.is_finite()), "{:?}", row.metric);
    }
    assert_eq!(view.months[0].metrics.bep, 0.0);
    assert_close(view.months[0].metrics.operating_profit, -100.0);
    assert_eq!(view.months[1].metrics.bep, 0.0);
    assert_close(view.months[1].metrics.marginal_profit_ratio, -150.0);
    assert_eq!(view.months[2].metrics.op_margin, 0.0);
}

#[test]
fn test_share_round_trip_with_negative_and_fractional_values() {
    let mut dataset = machine_shop();
    dataset.actual[4].sales = -12_345.678_9;
    dataset.target[7].depreciation = 0.1 + 0.2;
    dataset.actual[11].mfg_oh = 1.0 / 7.0;

    let token = encode(&dataset);
    assert!(!token.contains('='));
    assert_eq!(decode(&token).unwrap(), dataset);
}

#[test]
fn test_shared_link_workflow() {
    let config = DashboardConfig::default();
    let mut owner = DashboardSession::open("", MemoryStore::from_config(&config), config.clone());
    assert_eq!(owner.source(), DataSource::Fresh);

    let written = owner
        .paste(
            &PasteLayout::series(SeriesKind::Actual),
            PasteAnchor { month: 0, row: 0 },
            "10\t20\n30\t40",
        )
        .unwrap();
    assert_eq!(written, 4);
    assert_eq!(owner.dataset().actual[1].sales, 20.0);
    assert_eq!(owner.dataset().actual[1].material_cost, 40.0);

    let url = owner.share_url("https://dash.example.com/pl");
    assert!(url.starts_with("https://dash.example.com/pl?view="));

    let mut viewer = DashboardSession::open(&url, MemoryStore::from_config(&config), config);
    assert_eq!(viewer.source(), DataSource::SharedLink);
    assert_eq!(viewer.dataset(), owner.dataset());
    assert!(matches!(
        viewer.edit_cell(SeriesKind::Target, 0, FigureField::Sales, "1"),
        Err(DashboardError::ReadOnlySharedView)
    ));
    assert!(viewer.store().raw().is_none());
}

#[test]
fn test_file_store_session_persists_edits() {
    let dir = std::env::temp_dir().join(format!("pl_dashboard_it_{}", std::process::id()));
    let config = DashboardConfig {
        storage_dir: dir.display().to_string(),
        ..DashboardConfig::default()
    };

    let mut session = DashboardSession::open("", FileStore::from_config(&config), config.clone());
    session
        .edit_cell(SeriesKind::Target, 2, FigureField::Sales, "3,500,000")
        .unwrap();

    let reopened = DashboardSession::open("", FileStore::from_config(&config), config.clone());
    assert_eq!(reopened.source(), DataSource::Persisted);
    assert_eq!(reopened.dataset().target[2].sales, 3_500_000.0);

    std::fs::write(FileStore::from_config(&config).path(), "garbage").unwrap();
    let recovered = DashboardSession::open("", FileStore::from_config(&config), config);
    assert_eq!(recovered.source(), DataSource::Fresh);
    assert_eq!(recovered.dataset(), &Dataset::zeroed());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_schema_generation() {
    let schema_json = Dataset::schema_as_json().unwrap();
    println!("Generated schema:\n{}", schema_json);
    assert!(schema_json.contains("depreciation"));
    assert!(schema_json.contains("mfgOH"));
}
