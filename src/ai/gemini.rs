use super::{
    normalize_message, parse_product_reply, parse_products_reply, ProductDraft,
    MAX_MULTI_INPUT_CHARS, MAX_SINGLE_INPUT_CHARS,
};
use crate::domain::inventory::Category;
use crate::domain::ports::ProductExtractor;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_fallback_model() -> String {
    DEFAULT_FALLBACK_MODEL.to_string()
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: api_key.into(),
            model: default_model(),
            fallback_model: default_fallback_model(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
    }
}

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Asks the primary model, then the fallback model if the primary is unknown.
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self.generate_with(&self.config.model, prompt).await {
            Err(OptimizerError::AiResponseError { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16()
                    && self.config.fallback_model != self.config.model =>
            {
                tracing::warn!(
                    "⚠️ Model {} not found, retrying with {}",
                    self.config.model,
                    self.config.fallback_model
                );
                self.generate_with(&self.config.fallback_model, prompt).await
            }
            other => other,
        }
    }

    async fn generate_with(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!("Sending generateContent request to model {}", model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("AI response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OptimizerError::AiResponseError {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload
            .into_text()
            .ok_or_else(|| OptimizerError::AiResponseError {
                status: status.as_u16(),
                message: "response contained no text".to_string(),
            })
    }
}

fn category_list() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn product_prompt(message: &str) -> String {
    format!(
        r#"You extract product details for a Bangladeshi online shop.
Message: "{message}"

The message may be chatty and written in Banglish. "tk"/"taka"/"dam" mark a price,
"pcs"/"piece"/"ta"/"guti"/"qty" mark a quantity. "lal shirt 50 ta 500tk" means
Red Shirt, 50 pieces, 500 taka each.

Category must be one of: {categories}.
Use null for anything you cannot find. Reply with one JSON object only:
{{"name": String, "price": Number, "quantity": Number, "color": String or null, "category": String or null}}"#,
        message = message,
        categories = category_list()
    )
}

fn products_prompt(message: &str) -> String {
    format!(
        r#"You extract every product listed in a supplier message for a Bangladeshi online shop.
Message: "{message}"

The message may be written in Banglish. "tk"/"taka"/"dam" mark a price,
"pcs"/"piece"/"ta"/"guti"/"qty" mark a quantity.

Category must be one of: {categories}.
Use null for anything you cannot find. Reply with a JSON array only, one object per product:
[{{"name": String, "price": Number, "quantity": Number, "color": String or null, "category": String or null}}]"#,
        message = message,
        categories = category_list()
    )
}

#[async_trait]
impl ProductExtractor for GeminiClient {
    async fn extract_product(&self, raw_text: &str) -> Result<Option<ProductDraft>> {
        let message = normalize_message(raw_text, MAX_SINGLE_INPUT_CHARS);
        if message.is_empty() {
            return Ok(None);
        }

        let reply = self.generate(&product_prompt(&message)).await?;
        Ok(parse_product_reply(&reply))
    }

    async fn extract_products(&self, raw_text: &str) -> Result<Vec<ProductDraft>> {
        let message = normalize_message(raw_text, MAX_MULTI_INPUT_CHARS);
        if message.is_empty() {
            return Ok(Vec::new());
        }

        let reply = self.generate(&products_prompt(&message)).await?;
        Ok(parse_products_reply(&reply))
    }
}
