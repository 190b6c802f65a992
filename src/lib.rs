pub mod ai;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod parser;
pub mod profit;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use ai::{GeminiClient, GeminiConfig, ProductDraft};
pub use core::{
    engine::{ImportEngine, ImportReport},
    pipeline::OrderImportPipeline,
};
pub use parser::{classify_zone, extract_address, extract_name, extract_phone, parse_order_text};
pub use parser::{City, DeliveryZone, ParsedContact, TextParser};
pub use profit::{compute_profit, summarize, DashboardSummary, OrderAmounts, ProfitOptions};
pub use utils::error::{OptimizerError, Result};
