use clap::Parser;
use profit_optimizer::core::ConfigProvider;
use profit_optimizer::profit::AdCostMode;
use profit_optimizer::utils::error::ErrorSeverity;
use profit_optimizer::utils::{logger, validation::Validate};
use profit_optimizer::{ImportEngine, LocalStorage, OrderImportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Order profit report driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "profit-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the input CSV from config
    #[arg(long)]
    input: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose
        || config
            .monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .is_some_and(|level| level.eq_ignore_ascii_case("debug"));
    logger::init_cli_logger(verbose);

    tracing::info!("🚀 Starting TOML-based order report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(input) = args.input.clone() {
        tracing::info!("🔧 Input overridden to: {}", input);
        config.source.input_path = input;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config).await;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(".");
    let pipeline = OrderImportPipeline::new(storage, config);
    let engine = ImportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            println!("✅ Order report completed!");
            println!("📁 Output saved to: {}", report.output_path);
            println!(
                "  Orders: {} imported, {} skipped",
                report.imported, report.skipped
            );
            println!(
                "  Net profit: {:.2} ({:.1}% margin)",
                report.summary.net_profit, report.summary.profit_margin
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Order report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

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
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    match &config.workspace.name {
        Some(name) => println!("  Workspace: {} ({})", name, config.workspace.id),
        None => println!("  Workspace: {}", config.workspace.id),
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📥 Input:");
    match tokio::fs::metadata(config.input_path()).await {
        Ok(meta) => println!("  {} ({} bytes)", config.input_path(), meta.len()),
        Err(e) => println!("  ⚠️ {} is not readable: {}", config.input_path(), e),
    }

    println!();
    println!("🧮 Pricing:");
    let options = config.profit_options();
    println!("  Packaging fee: {}", options.packaging_fee);
    match options.ad_cost_mode {
        AdCostMode::Locked => println!("  Ad cost: locked (stored per order)"),
        AdCostMode::Dynamic { average_cpr } => {
            println!("  Ad cost: dynamic (average CPR {})", average_cpr)
        }
    }

    let extra = &config.parser;
    let added = extra.extra_dhaka_areas.len()
        + extra.extra_address_keywords.len()
        + extra.extra_filler_words.len();
    if added > 0 {
        println!();
        println!("🔤 Parser rules: {} extra keywords", added);
    }

    println!();
    println!("💾 Output:");
    println!(
        "  {}/{}",
        config.output_path(),
        profit_optimizer::core::pipeline::REPORT_FILENAME
    );

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
