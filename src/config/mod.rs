pub mod cli;
pub mod toml_config;

use crate::profit::{AdCostMode, ProfitOptions, MAX_AMOUNT};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
#[cfg(feature = "cli")]
use crate::{
    core::ConfigProvider,
    profit::{DEFAULT_AVERAGE_CPR, DEFAULT_PACKAGING_FEE},
    utils::validation::{validate_non_empty_string, validate_output_formats, validate_path, Validate},
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

/// How ad spend is charged when orders are priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AdCostSetting {
    /// Use the ad cost saved with each order
    #[default]
    Locked,
    /// Charge the average CPR to every order
    Dynamic,
}

impl AdCostSetting {
    pub fn profit_options(self, packaging_fee: f64, average_cpr: f64) -> ProfitOptions {
        let ad_cost_mode = match self {
            AdCostSetting::Locked => AdCostMode::Locked,
            AdCostSetting::Dynamic => AdCostMode::Dynamic { average_cpr },
        };
        ProfitOptions {
            packaging_fee,
            ad_cost_mode,
        }
    }
}

/// Shared checks for the money knobs both config kinds expose.
pub(crate) fn validate_profit_settings(prefix: &str, packaging_fee: f64, average_cpr: f64) -> Result<()> {
    validate_range(&format!("{}packaging_fee", prefix), packaging_fee, 0.0, MAX_AMOUNT)?;
    validate_range(&format!("{}average_cpr", prefix), average_cpr, 0.0, MAX_AMOUNT)?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "profit-optimizer")]
#[command(about = "Turn pasted e-commerce orders into a priced profit report")]
pub struct CliConfig {
    /// CSV file with one pasted order per row
    #[arg(short, long, default_value = "orders.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "default")]
    pub workspace_id: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub output_formats: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_PACKAGING_FEE)]
    pub packaging_fee: f64,

    #[arg(long, value_enum, default_value_t = AdCostSetting::Locked)]
    pub ad_cost_mode: AdCostSetting,

    /// Cost per result charged in dynamic ad-cost mode
    #[arg(long, default_value_t = DEFAULT_AVERAGE_CPR)]
    pub average_cpr: f64,

    #[arg(long, help = "Log how long each stage took")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn profit_options(&self) -> ProfitOptions {
        self.ad_cost_mode
            .profit_options(self.packaging_fee, self.average_cpr)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("workspace_id", &self.workspace_id)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        validate_profit_settings("", self.packaging_fee, self.average_cpr)?;
        Ok(())
    }
}
