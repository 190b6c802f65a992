use clap::Parser;
use profit_optimizer::utils::error::{ErrorSeverity, OptimizerError};
use profit_optimizer::utils::{logger, validation::Validate};
use profit_optimizer::{CliConfig, ImportEngine, ImportReport, LocalStorage, OrderImportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init(config.verbose, config.log_json);

    tracing::info!("Starting profit-optimizer CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(".");
    let pipeline = OrderImportPipeline::new(storage, config);
    let engine = ImportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => print_report(&report),
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn print_report(report: &ImportReport) {
    let summary = &report.summary;
    println!("✅ Order report completed");
    println!("📁 Output saved to: {}", report.output_path);
    println!("  Orders imported: {}", report.imported);
    if report.skipped > 0 {
        println!("  Rows skipped:    {} (see skipped.json)", report.skipped);
    }
    println!("  Revenue:         {:.2}", summary.total_revenue);
    println!("  Expenses:        {:.2}", summary.total_expenses);
    println!("  Net profit:      {:.2}", summary.net_profit);
    println!("  Profit margin:   {:.1}%", summary.profit_margin);
}

fn exit_with(e: OptimizerError) {
    tracing::error!(
        "❌ Order import failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
