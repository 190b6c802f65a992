use crate::ai::ProductDraft;
use crate::domain::model::{OrderInput, TransformResult};
use crate::parser::ParserRules;
use crate::profit::ProfitOptions;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn workspace_id(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn profit_options(&self) -> ProfitOptions;

    fn parser_rules(&self) -> ParserRules {
        ParserRules::default()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<OrderInput>>;
    async fn transform(&self, data: Vec<OrderInput>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}

/// Turns a free-form supplier message into product fields.
#[async_trait]
pub trait ProductExtractor: Send + Sync {
    async fn extract_product(&self, raw_text: &str) -> Result<Option<ProductDraft>>;
    async fn extract_products(&self, raw_text: &str) -> Result<Vec<ProductDraft>>;
}
