use crate::core::Pipeline;
use crate::profit::DashboardSummary;
use crate::utils::error::Result;
use std::time::Instant;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub output_path: String,
    pub imported: usize,
    pub skipped: usize,
    pub summary: DashboardSummary,
}

pub struct ImportEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor_enabled: false,
        }
    }

    /// Same as `new`, but logs how long each stage took.
    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub async fn run(&self) -> Result<ImportReport> {
        tracing::info!("🚀 Starting order import");
        let started = Instant::now();

        // Extract
        let stage = Instant::now();
        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} order rows", rows.len());
        self.log_stage("extract", stage);

        // Transform
        let stage = Instant::now();
        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "🧮 Priced {} orders, skipped {}",
            result.orders.len(),
            result.skipped.len()
        );
        self.log_stage("transform", stage);

        let imported = result.orders.len();
        let skipped = result.skipped.len();
        let summary = result.summary.clone();

        // Load
        let stage = Instant::now();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Report saved to: {}", output_path);
        self.log_stage("load", stage);

        if self.monitor_enabled {
            tracing::info!("⏱️ Total run time: {:?}", started.elapsed());
        }

        Ok(ImportReport {
            output_path,
            imported,
            skipped,
            summary,
        })
    }

    fn log_stage(&self, name: &str, started: Instant) {
        if self.monitor_enabled {
            tracing::info!("⏱️ Stage {} took {:?}", name, started.elapsed());
        }
    }
}
