// ==========================================
// 季节款机会损失预测系统 - 命令行入口
// ==========================================
// 用法:
//   season-loss-forecast <series.json> [report.json] [brand_config.json]
//
// - series.json: WeeklyRow 数组
// - report.json: 批次报告输出路径（默认 ./loss_report.json）
// - brand_config.json: 品牌配置（缺省时按 LOSS_FORECAST_CONFIG / 用户配置目录查找）
// ==========================================

use anyhow::Context;
use season_loss_forecast::config::ConfigLoader;
use season_loss_forecast::engine::BatchOrchestrator;
use season_loss_forecast::io::{JsonReportSink, JsonSeriesSource, LossSummarySink, SeriesSource};
use season_loss_forecast::logging;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let series_path = args
        .next()
        .map(PathBuf::from)
        .context("缺少参数: <series.json>")?;
    let report_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("loss_report.json"));
    let config_loader = ConfigLoader::from_path_or_default(args.next().map(PathBuf::from));

    tracing::info!("==================================================");
    tracing::info!("{} v{}", season_loss_forecast::APP_NAME, season_loss_forecast::VERSION);
    tracing::info!("==================================================");
    tracing::info!(config = %config_loader.path().display(), series = %series_path.display(), "加载输入");

    // 配置与周度数据并发加载; 配置错误为致命错误
    let source = JsonSeriesSource::new(&series_path);
    let (config, batch) = futures::try_join!(
        async { config_loader.load_async().await.context("配置加载失败") },
        async { source.load_series().await.context("周度数据加载失败") },
    )?;

    let orchestrator = BatchOrchestrator::new(Arc::new(config));
    let report = tokio::task::spawn_blocking(move || orchestrator.run(&batch))
        .await
        .context("批次分析线程异常退出")?;

    JsonReportSink::new(&report_path)
        .publish(&report)
        .await
        .context("批次报告写出失败")?;

    println!(
        "run_id={} series={} loss_found={} total_loss={} report={}",
        report.run_id,
        report.counts.total(),
        report.counts.loss_found,
        report.total_loss(),
        report_path.display()
    );
    Ok(())
}
