use super::{validate_profit_settings, AdCostSetting};
use crate::ai::GeminiConfig;
use crate::core::ConfigProvider;
use crate::parser::{ParserRules, RuleOverrides};
use crate::profit::{ProfitOptions, DEFAULT_AVERAGE_CPR, DEFAULT_PACKAGING_FEE};
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_output_formats, validate_path, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub workspace: WorkspaceConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub profit: ProfitConfig,
    #[serde(default)]
    pub parser: RuleOverrides,
    pub load: LoadConfig,
    pub ai: Option<GeminiConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitConfig {
    #[serde(default = "default_packaging_fee")]
    pub packaging_fee: f64,
    #[serde(default)]
    pub ad_cost_mode: AdCostSetting,
    #[serde(default = "default_average_cpr")]
    pub average_cpr: f64,
}

fn default_packaging_fee() -> f64 {
    DEFAULT_PACKAGING_FEE
}

fn default_average_cpr() -> f64 {
    DEFAULT_AVERAGE_CPR
}

impl Default for ProfitConfig {
    fn default() -> Self {
        Self {
            packaging_fee: DEFAULT_PACKAGING_FEE,
            ad_cost_mode: AdCostSetting::default(),
            average_cpr: DEFAULT_AVERAGE_CPR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OptimizerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| OptimizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("workspace.id", &self.workspace.id)?;
        validate_path("source.input_path", &self.source.input_path)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_output_formats("load.output_formats", &self.load.output_formats)?;
        validate_profit_settings("profit.", self.profit.packaging_fee, self.profit.average_cpr)?;

        if let Some(ai) = &self.ai {
            validate_url("ai.endpoint", &ai.endpoint)?;
            validate_non_empty_string("ai.model", &ai.model)?;
            // 環境變數沒設定時會留下 ${...}
            if ai.api_key.trim().is_empty() || ENV_VAR_RE.is_match(&ai.api_key) {
                return Err(OptimizerError::MissingConfigError {
                    field: "ai.api_key".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// `[ai]` section, required by the product extraction tool.
    pub fn ai_config(&self) -> Result<&GeminiConfig> {
        validate_required_field("ai", &self.ai)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn workspace_id(&self) -> &str {
        &self.workspace.id
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn profit_options(&self) -> ProfitOptions {
        self.profit
            .ad_cost_mode
            .profit_options(self.profit.packaging_fee, self.profit.average_cpr)
    }

    fn parser_rules(&self) -> ParserRules {
        ParserRules::with_overrides(&self.parser)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
