use pl_dashboard::*;

fn main() -> Result<()> {
    println!("📊 P&L Dashboard Demo\n");

    let config = DashboardConfig::default();
    let mut session = DashboardSession::open("", MemoryStore::from_config(&config), config);

    // Twelve months of plan for sales and material cost, pasted as from a spreadsheet.
    let plan = [
        vec!["120000"; MONTHS].join("\t"),
        vec!["48000"; MONTHS].join("\t"),
        vec!["15000"; MONTHS].join("\t"),
        vec!["22000"; MONTHS].join("\t"),
    ]
    .join("\n");
    session.paste(&PasteLayout::series(SeriesKind::Target), PasteAnchor::default(), &plan)?;

    // First-half actuals, one row per field.
    let actuals = "98000\t105000\t131000\t118000\t126000\t140000\n\
                   41000\t43500\t52000\t47800\t50100\t55600\n\
                   15000\t15000\t15500\t15500\t15500\t16000\n\
                   21000\t21800\t23000\t22400\t22900\t24100\n\
                   6000\t6100\t5900\t6200\t6300\t6400\n\
                   9000\t9400\t9900\t9700\t9800\t10300\n\
                   4000\t4000\t4000\t4000\t4000\t4000";
    let written = session.paste(&PasteLayout::series(SeriesKind::Actual), PasteAnchor::default(), actuals)?;
    println!("✏️  Pasted {} actual cells\n", written);

    for mode in [ViewMode::Monthly, ViewMode::Cumulative] {
        session.view_mode = mode;
        session.period = DisplayPeriod::FirstHalf;
        let view = session.view();

        println!("📅 {:?} view, first half", mode);
        for row in &view.months {
            println!(
                "  {:<9} sales {:>10.0} (target {:>10.0})  OP {:>9.0}  margin {:>5.1}%  BEP {:>10.0}",
                row.label,
                row.actual_sales,
                row.target_sales,
                row.metrics.operating_profit,
                row.metrics.op_margin,
                row.actual_bep
            );
        }

        let summary = &view.summary;
        println!(
            "  Summary: sales {:.0} ({:.1}% of target), OP after depr. {:.0}, BEP {:.0}\n",
            summary.actual_figures.sales,
            summary.sales_achievement(),
            summary.actual.op_incl_depr,
            summary.actual.bep
        );
    }

    let url = session.share_url("https://dashboard.example.com/");
    println!("🔗 Share link ({} chars):\n  {}", url.len(), url);

    let shared = DashboardSession::open(&url, MemoryStore::new(DEFAULT_STORAGE_KEY), DashboardConfig::default());
    println!(
        "\n✅ Shared view matches: {} (read-only: {})",
        shared.dataset() == session.dataset(),
        shared.is_shared()
    );

    Ok(())
}
