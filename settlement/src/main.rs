use serde::Serialize;
use settlement::money::format_currency;
use settlement::{Config, MemoryStore, SettlementMonitor, SettlementReport, init_logger_with_file};

/// Report as printed: whole-unit display figures next to full precision
#[derive(Serialize)]
struct ReportOutput<'a> {
    display: SettlementReport,
    full: &'a SettlementReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (.env, 配置, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.log_json || config.is_production(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        snapshot = %config.snapshot_path,
        filter = %config.date_filter,
        "Settlement report starting"
    );

    // 2. 加载数据导出
    let store = MemoryStore::from_file(&config.snapshot_path)?;

    // 3. 订阅并计算
    let monitor = SettlementMonitor::attach(&store, config.date_filter);
    let report = monitor
        .latest()
        .ok_or_else(|| anyhow::anyhow!("settlement monitor produced no report"))?;

    tracing::info!(
        orders = report.order_count,
        restaurants = report.restaurants.len(),
        partners = report.partners.len(),
        gross = %format_currency(report.totals.gross_revenue),
        payable = %format_currency(report.totals.restaurant_payable),
        commission = %format_currency(report.totals.commission),
        "Settlement computed"
    );

    // 4. 输出
    let output = ReportOutput {
        display: report.rounded(0),
        full: &report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
